//! Command parsing for chat input.
//!
//! Commands arrive as dot-prefixed text. Several commands are *compact*:
//! the keyword and its argument may be glued together (`.rd100`,
//! `.ra侦查50`, `.rar2侦查`). The keyword/skill segment is stripped here;
//! the engine's expression parser only ever sees the numeric/dice
//! grammar.

use kp_mech::rules::Edition;

/// Cap on bonus or penalty dice in one command.
const MAX_BP_DICE: u32 = 10;

/// Cap on `t<N>` multi-round markers.
const MAX_ROUNDS: u32 = 10;

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Roll a dice expression (`.r`, `.rd`, `.rhd`), optionally with
    /// bonus/penalty dice when the expression is a plain d100.
    Roll {
        /// The normalized expression text.
        expr: String,
        /// Bonus dice requested.
        bonus: u32,
        /// Penalty dice requested.
        penalty: u32,
        /// Whether the result goes to the user privately (`.rhd`).
        hidden: bool,
    },
    /// A skill check (`.ra`, `.rc`, `.rha`).
    SkillCheck {
        /// Free-text skill name, not yet alias-resolved.
        skill: String,
        /// Explicit target value, when given inline.
        target: Option<u32>,
        /// Bonus dice.
        bonus: u32,
        /// Penalty dice.
        penalty: u32,
        /// Number of independent rounds (`t<N>`, default 1).
        rounds: u32,
        /// Whether the result goes to the user privately.
        hidden: bool,
    },
    /// A sanity check (`.sc <success>/<failure>`).
    SanCheck {
        /// Loss expression when the roll succeeds.
        success_loss: String,
        /// Loss expression when the roll fails.
        failure_loss: String,
    },
    /// Start an opposed check (`.ad @user <skill> [skill2] [r/p]...`).
    Opposed {
        /// The opposing user's key.
        target_user: String,
        /// Initiator's skill name.
        initiator_skill: String,
        /// Target's skill name (defaults to the initiator's).
        target_skill: String,
        /// Initiator bonus dice.
        initiator_bonus: u32,
        /// Initiator penalty dice.
        initiator_penalty: u32,
        /// Target bonus dice.
        target_bonus: u32,
        /// Target penalty dice.
        target_penalty: u32,
    },
    /// Answer an opposed check by session id (`.ado <id>`).
    OpposedRoll {
        /// The short session id.
        check_id: String,
    },
    /// Import a character sheet from a JSON payload (`.pc import {...}`).
    ImportCharacter {
        /// The raw JSON payload.
        payload: String,
    },
    /// Show the active character sheet (`.pc show`).
    ShowCharacter,
    /// Show the current rule configuration (`.rule` / `.rule show`).
    ShowRule,
    /// Switch edition (`.rule coc6` / `.rule coc7`).
    SetEdition(Edition),
    /// Change the critical threshold (`.rule crit <n>`).
    SetCritical(u32),
    /// Change the fumble threshold (`.rule fumble <n>`).
    SetFumble(u32),
    /// Apply a numbered preset (`.set <n>`).
    SetPreset(u8),
    /// List the available presets (`.set`).
    ListPresets,
    /// Show help.
    Help,
    /// A recognized command with unusable arguments; reply with usage.
    Usage(&'static str),
    /// Input that matched no command.
    Unknown {
        /// The original input.
        input: String,
    },
}

/// Commands whose argument may be glued to the keyword.
const COMPACT: &[&str] = &["sc", "rhd", "rha", "ra", "rc", "rd", "r"];

/// All keywords, longest-conflicting first so `.rule` never lexes as
/// `.r ule` and `.ado` never as `.ad o`.
const KEYWORDS: &[&str] = &[
    "help", "rule", "set", "ado", "ad", "pc", "sc", "rhd", "rha", "ra", "rc", "rd", "r",
];

/// Parse one line of chat input into a [`Command`].
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix('.').unwrap_or(trimmed);

    for &keyword in KEYWORDS {
        let Some(rest) = strip_keyword(body, keyword) else {
            continue;
        };
        let compact = COMPACT.contains(&keyword);
        // Word commands need a separator (or nothing) after the keyword.
        if !compact && !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
            continue;
        }
        let args = rest.trim();
        return match keyword {
            "r" | "rd" => parse_roll(args, false),
            "rhd" => parse_roll(args, true),
            "ra" => parse_skill_check(args, false),
            "rha" => parse_skill_check(args, true),
            "rc" => parse_value_check(args),
            "sc" => parse_san_check(args),
            "ad" => parse_opposed(args),
            "ado" => parse_opposed_roll(args),
            "pc" => parse_character(args),
            "rule" => parse_rule(args),
            "set" => parse_preset(args),
            "help" => Command::Help,
            _ => unreachable!("keyword table and dispatch table out of sync"),
        };
    }

    Command::Unknown {
        input: trimmed.to_string(),
    }
}

fn strip_keyword<'a>(body: &'a str, keyword: &str) -> Option<&'a str> {
    if body.len() < keyword.len() {
        return None;
    }
    let (head, rest) = body.split_at_checked(keyword.len())?;
    head.eq_ignore_ascii_case(keyword).then_some(rest)
}

/// `.r [r<N>|p<N>]... [expr]` — default expression is a d100.
fn parse_roll(args: &str, hidden: bool) -> Command {
    let mut bonus = 0;
    let mut penalty = 0;
    let mut expr_parts: Vec<&str> = Vec::new();

    for token in args.split_whitespace() {
        if expr_parts.is_empty() {
            if let Some((b, p)) = parse_bp_token(token) {
                bonus += b;
                penalty += p;
                continue;
            }
        }
        expr_parts.push(token);
    }

    let expr = normalize_dice_expr(&expr_parts.join(""));
    Command::Roll {
        expr,
        bonus: bonus.min(MAX_BP_DICE),
        penalty: penalty.min(MAX_BP_DICE),
        hidden,
    }
}

/// `.ra`/`.rha` — spaced (`.ra r2 侦查 50`) or compact (`.rar2侦查50`).
fn parse_skill_check(args: &str, hidden: bool) -> Command {
    if args.is_empty() {
        return Command::Usage("usage: .ra <skill> [value], e.g. .ra侦查 or .ra侦查50");
    }

    let (bonus, penalty, rounds, skill, target) = if args.contains(char::is_whitespace) {
        parse_skill_spaced(args)
    } else {
        parse_skill_compact(args)
    };

    if skill.is_empty() {
        return Command::Usage("usage: .ra <skill> [value], e.g. .ra侦查 or .ra侦查50");
    }

    Command::SkillCheck {
        skill,
        target,
        bonus: bonus.min(MAX_BP_DICE),
        penalty: penalty.min(MAX_BP_DICE),
        rounds: rounds.clamp(1, MAX_ROUNDS),
        hidden,
    }
}

fn parse_skill_spaced(args: &str) -> (u32, u32, u32, String, Option<u32>) {
    let mut bonus = 0;
    let mut penalty = 0;
    let mut rounds = 1;
    let mut parts: Vec<&str> = Vec::new();

    for token in args.split_whitespace() {
        if let Some((b, p)) = parse_bp_token(token) {
            bonus += b;
            penalty += p;
        } else if let Some(t) = parse_times_token(token) {
            rounds = t;
        } else {
            parts.push(token);
        }
    }

    let mut target = None;
    if parts.len() >= 2
        && let Some(&last) = parts.last()
        && let Ok(value) = last.parse::<u32>()
    {
        target = Some(value);
        parts.pop();
    }

    (bonus, penalty, rounds, parts.join(" "), target)
}

/// Compact form: leading `r`/`p`/`t` markers (digits required so skill
/// names starting with those letters survive), trailing digits as the
/// explicit target, skill name in between. Markers are consumed before
/// the target is split off, so `.ra r2` and `.ra50` leave an empty skill
/// rather than mistaking a marker or value for one.
fn parse_skill_compact(args: &str) -> (u32, u32, u32, String, Option<u32>) {
    let mut rest = args;
    let mut bonus = 0;
    let mut penalty = 0;
    let mut rounds = 1;
    loop {
        let mut chars = rest.chars();
        let Some(marker) = chars.next() else { break };
        let marker = marker.to_ascii_lowercase();
        if !matches!(marker, 'r' | 'p' | 't') {
            break;
        }
        let digits: String = chars.clone().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            break;
        }
        let Ok(count) = digits.parse::<u32>() else {
            break;
        };
        match marker {
            'r' => bonus += count.min(MAX_BP_DICE),
            'p' => penalty += count.min(MAX_BP_DICE),
            't' => rounds = count.clamp(1, MAX_ROUNDS),
            _ => unreachable!("marker was matched above"),
        }
        rest = &rest[1 + digits.len()..];
    }

    let mut target = None;
    let digits_at_end: usize = rest
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .map(char::len_utf8)
        .sum();
    if digits_at_end > 0 {
        let split = rest.len() - digits_at_end;
        target = rest[split..].parse::<u32>().ok();
        rest = &rest[..split];
    }

    (bonus, penalty, rounds, rest.trim().to_string(), target)
}

/// `.rc [r/p] <skill> <value>` — the value is mandatory.
fn parse_value_check(args: &str) -> Command {
    let mut tokens: Vec<&str> = args.split_whitespace().collect();
    let mut bonus = 0;
    let mut penalty = 0;

    if let Some(&first) = tokens.first()
        && let Some((b, p)) = parse_bp_token(first)
    {
        bonus = b;
        penalty = p;
        tokens.remove(0);
    }

    if tokens.len() < 2 {
        return Command::Usage("usage: .rc <skill> <value>, e.g. .rc 侦查 60");
    }
    let Ok(target) = tokens[tokens.len() - 1].parse::<u32>() else {
        return Command::Usage("the target value must be a number, e.g. .rc 侦查 60");
    };
    let skill = tokens[..tokens.len() - 1].join(" ");

    Command::SkillCheck {
        skill,
        target: Some(target),
        bonus: bonus.min(MAX_BP_DICE),
        penalty: penalty.min(MAX_BP_DICE),
        rounds: 1,
        hidden: false,
    }
}

/// `.sc <success>/<failure>`, e.g. `.sc 0/1d6` or `.sc1/1d10`.
fn parse_san_check(args: &str) -> Command {
    let Some((success, failure)) = args.split_once('/') else {
        return Command::Usage("usage: .sc <success loss>/<failure loss>, e.g. .sc 0/1d6");
    };
    let success = success.trim();
    let failure = failure.trim();
    if success.is_empty() || failure.is_empty() {
        return Command::Usage("usage: .sc <success loss>/<failure loss>, e.g. .sc 0/1d6");
    }
    Command::SanCheck {
        success_loss: normalize_loss_expr(success),
        failure_loss: normalize_loss_expr(failure),
    }
}

/// `.ad @user <skill> [skill2] [r/p] [r/p]`.
fn parse_opposed(args: &str) -> Command {
    let mut tokens = args.split_whitespace();
    let Some(user_token) = tokens.next() else {
        return Command::Usage("usage: .ad @user <skill> [skill2] [r/p] [r/p]");
    };
    let target_user = user_token.trim_start_matches('@').to_string();
    if target_user.is_empty() {
        return Command::Usage("usage: .ad @user <skill> [skill2] [r/p] [r/p]");
    }

    let mut skills: Vec<&str> = Vec::new();
    let mut bp: Vec<(u32, u32)> = Vec::new();
    for token in tokens {
        if let Some(pair) = parse_bp_token(token) {
            bp.push(pair);
        } else {
            skills.push(token);
        }
    }

    let (initiator_skill, target_skill) = match skills.as_slice() {
        [] => return Command::Usage("name at least one skill, e.g. .ad @user 斗殴 闪避"),
        [one] => ((*one).to_string(), (*one).to_string()),
        [first, second, ..] => ((*first).to_string(), (*second).to_string()),
    };
    let (initiator_bonus, initiator_penalty) = bp.first().copied().unwrap_or((0, 0));
    let (target_bonus, target_penalty) = bp.get(1).copied().unwrap_or((0, 0));

    Command::Opposed {
        target_user,
        initiator_skill,
        target_skill,
        initiator_bonus,
        initiator_penalty,
        target_bonus,
        target_penalty,
    }
}

fn parse_opposed_roll(args: &str) -> Command {
    let id = args.trim();
    if id.is_empty() {
        return Command::Usage("usage: .ado <check id>");
    }
    Command::OpposedRoll {
        check_id: id.to_string(),
    }
}

fn parse_character(args: &str) -> Command {
    if let Some(payload) = args.strip_prefix("import") {
        let payload = payload.trim();
        if payload.is_empty() {
            return Command::Usage("usage: .pc import <json payload>");
        }
        return Command::ImportCharacter {
            payload: payload.to_string(),
        };
    }
    if args.is_empty() || args.eq_ignore_ascii_case("show") {
        return Command::ShowCharacter;
    }
    Command::Usage("usage: .pc show or .pc import <json payload>")
}

fn parse_rule(args: &str) -> Command {
    let mut tokens = args.split_whitespace();
    let sub = tokens.next().unwrap_or("show").to_ascii_lowercase();
    match sub.as_str() {
        "show" => Command::ShowRule,
        "coc6" | "coc7" => match Edition::parse(&sub) {
            Some(edition) => Command::SetEdition(edition),
            None => Command::ShowRule,
        },
        "crit" => match tokens.next().and_then(|t| t.parse::<u32>().ok()) {
            Some(value) => Command::SetCritical(value),
            None => Command::Usage("usage: .rule crit <1-20>"),
        },
        "fumble" => match tokens.next().and_then(|t| t.parse::<u32>().ok()) {
            Some(value) => Command::SetFumble(value),
            None => Command::Usage("usage: .rule fumble <80-100>"),
        },
        _ => Command::Usage("usage: .rule show | coc6 | coc7 | crit <n> | fumble <n>"),
    }
}

fn parse_preset(args: &str) -> Command {
    if args.is_empty() {
        return Command::ListPresets;
    }
    match args.parse::<u8>() {
        Ok(id) => Command::SetPreset(id),
        Err(_) => Command::Usage("usage: .set <preset number>, or .set to list presets"),
    }
}

/// A spaced `r<N>`/`p<N>` marker; a bare `r` or `p` counts as one die.
fn parse_bp_token(token: &str) -> Option<(u32, u32)> {
    let lower = token.to_ascii_lowercase();
    let rest = lower.strip_prefix(['r', 'p'])?;
    let count = if rest.is_empty() {
        1
    } else if rest.chars().all(|c| c.is_ascii_digit()) {
        rest.parse::<u32>().ok()?
    } else {
        return None;
    };
    let count = count.min(MAX_BP_DICE);
    if lower.starts_with('r') {
        Some((count, 0))
    } else {
        Some((0, count))
    }
}

/// A `t<N>` round marker, clamped to `1..=MAX_ROUNDS`.
fn parse_times_token(token: &str) -> Option<u32> {
    let lower = token.to_ascii_lowercase();
    let digits = lower.strip_prefix('t')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u32>().ok()?.clamp(1, MAX_ROUNDS))
}

/// Repair compact expressions: `100` means `d100`, `6+d4` means `d6+d4`.
/// Output is lowercased so `D100` and `d100` read the same downstream.
pub(crate) fn normalize_dice_expr(expr: &str) -> String {
    let expr = expr.trim().to_ascii_lowercase();
    let expr = expr.as_str();
    if expr.is_empty() {
        return "d100".to_string();
    }
    if expr.chars().all(|c| c.is_ascii_digit()) {
        return format!("d{expr}");
    }
    let leading_digits = expr.chars().take_while(char::is_ascii_digit).count();
    if leading_digits > 0 && matches!(expr[leading_digits..].chars().next(), Some('+' | '-')) {
        return format!("d{expr}");
    }
    expr.to_string()
}

/// SAN loss expressions keep plain numbers as constants.
fn normalize_loss_expr(expr: &str) -> String {
    if expr.chars().all(|c| c.is_ascii_digit()) {
        return expr.to_string();
    }
    normalize_dice_expr(expr)
}
