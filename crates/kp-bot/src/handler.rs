//! Command dispatch: from one line of chat to one reply.
//!
//! The dispatcher owns the RNG, the alias resolver, and the session
//! registry, and borrows everything else from its storage collaborators.
//! All reply text is assembled here; the engine only reports numbers.

use rand::SeedableRng;
use rand::rngs::StdRng;

use kp_mech::percentile::{PercentileRoll, roll_percentile};
use kp_mech::rules::{
    CheckResult, OpposedOutcome, RuleConfig, classify_check, oppose, preset, run_rounds,
};
use kp_mech::sheet::Character;
use kp_mech::{SkillResolver, eval, parse, san_check};

use crate::command::{Command, parse_command};
use crate::error::{BotError, BotResult};
use crate::session::{OpposedSession, OpposedSide, SessionRegistry};
use crate::store::{CharacterStore, RuleStore};

/// Who sent a command and where.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Key of the sending user.
    pub user: &'a str,
    /// Key of the channel the command arrived in.
    pub channel: &'a str,
}

/// A finished reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The reply text.
    pub text: String,
    /// True when the reply must go to the user privately.
    pub private: bool,
}

impl Reply {
    fn public(text: String) -> Self {
        Self {
            text,
            private: false,
        }
    }

    fn private(text: String) -> Self {
        Self {
            text,
            private: true,
        }
    }
}

/// Turns command strings into replies.
pub struct Dispatcher<C, R> {
    characters: C,
    rules: R,
    resolver: SkillResolver,
    sessions: SessionRegistry,
    rng: StdRng,
}

impl<C: CharacterStore, R: RuleStore> Dispatcher<C, R> {
    /// A dispatcher with an OS-seeded generator.
    pub fn new(characters: C, rules: R) -> Self {
        Self::with_rng(characters, rules, StdRng::from_os_rng())
    }

    /// A dispatcher with a caller-provided generator, for tests.
    pub fn with_rng(characters: C, rules: R, rng: StdRng) -> Self {
        Self {
            characters,
            rules,
            resolver: SkillResolver::new(),
            sessions: SessionRegistry::new(),
            rng,
        }
    }

    /// The character store, for callers that need to inspect sheets.
    pub fn characters(&self) -> &C {
        &self.characters
    }

    /// Handle one line of input. Errors become reply text.
    pub fn handle(&mut self, ctx: &CommandContext<'_>, input: &str) -> Reply {
        match self.try_handle(ctx, parse_command(input)) {
            Ok(reply) => reply,
            Err(err) => Reply::public(err.to_string()),
        }
    }

    fn try_handle(&mut self, ctx: &CommandContext<'_>, command: Command) -> BotResult<Reply> {
        match command {
            Command::Roll {
                expr,
                bonus,
                penalty,
                hidden,
            } => self.roll(&expr, bonus, penalty, hidden),
            Command::SkillCheck {
                skill,
                target,
                bonus,
                penalty,
                rounds,
                hidden,
            } => self.skill_check(ctx, &skill, target, bonus, penalty, rounds, hidden),
            Command::SanCheck {
                success_loss,
                failure_loss,
            } => self.san_check(ctx, &success_loss, &failure_loss),
            Command::Opposed {
                target_user,
                initiator_skill,
                target_skill,
                initiator_bonus,
                initiator_penalty,
                target_bonus,
                target_penalty,
            } => self.open_opposed(
                ctx,
                &target_user,
                &initiator_skill,
                &target_skill,
                (initiator_bonus, initiator_penalty),
                (target_bonus, target_penalty),
            ),
            Command::OpposedRoll { check_id } => self.answer_opposed(ctx, &check_id),
            Command::ImportCharacter { payload } => self.import_character(ctx, &payload),
            Command::ShowCharacter => self.show_character(ctx),
            Command::ShowRule => Ok(Reply::public(render_rule(
                &self.rules.rule_config(ctx.channel),
            ))),
            Command::SetEdition(edition) => {
                let mut config = self.rules.rule_config(ctx.channel);
                config.edition = edition;
                self.rules.put_rule_config(ctx.channel, config);
                Ok(Reply::public(format!("edition set to {edition}")))
            }
            Command::SetCritical(value) => {
                let mut config = self.rules.rule_config(ctx.channel);
                config.crit_threshold = value;
                config.validate()?;
                self.rules.put_rule_config(ctx.channel, config);
                Ok(Reply::public(format!("critical band set to 1-{value}")))
            }
            Command::SetFumble(value) => {
                let mut config = self.rules.rule_config(ctx.channel);
                config.fumble_threshold = value;
                config.validate()?;
                self.rules.put_rule_config(ctx.channel, config);
                Ok(Reply::public(format!("fumble band set to {value}-100")))
            }
            Command::SetPreset(id) => {
                let Some(found) = preset::by_id(id) else {
                    return Ok(Reply::public(format!(
                        "no preset {id}; use .set to list the available presets"
                    )));
                };
                self.rules.put_rule_config(ctx.channel, found.config);
                Ok(Reply::public(format!(
                    "applied preset {}: {} ({})",
                    found.id, found.name, found.summary
                )))
            }
            Command::ListPresets => {
                let mut lines: Vec<String> = preset::all()
                    .iter()
                    .map(|p| format!("{}. {}: {}", p.id, p.name, p.summary))
                    .collect();
                lines.push("apply one with .set <number>".to_string());
                Ok(Reply::public(lines.join("\n")))
            }
            Command::Help => Ok(Reply::public(HELP.to_string())),
            Command::Usage(usage) => Ok(Reply::public(usage.to_string())),
            Command::Unknown { input } => Ok(Reply::public(format!(
                "unrecognized command: {input} (try .help)"
            ))),
        }
    }

    fn roll(&mut self, expr: &str, bonus: u32, penalty: u32, hidden: bool) -> BotResult<Reply> {
        let text = if bonus > 0 || penalty > 0 {
            if expr != "d100" && expr != "1d100" {
                return Ok(Reply::public(
                    "bonus and penalty dice only apply to a plain d100".to_string(),
                ));
            }
            roll_percentile(bonus, penalty, &mut self.rng).to_string()
        } else {
            let parsed = parse(expr)?;
            let outcome = eval(&parsed, &mut self.rng);
            format!("{expr}: {outcome}")
        };
        if hidden {
            Ok(Reply::private(text))
        } else {
            Ok(Reply::public(text))
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn skill_check(
        &mut self,
        ctx: &CommandContext<'_>,
        skill: &str,
        target: Option<u32>,
        bonus: u32,
        penalty: u32,
        rounds: u32,
        hidden: bool,
    ) -> BotResult<Reply> {
        let (canonical, value) = match target {
            Some(value) => (self.resolver.resolve(skill), value),
            None => self.skill_target(ctx.user, skill)?,
        };
        let config = self.rules.rule_config(ctx.channel);

        let mut lines = Vec::with_capacity(rounds as usize);
        let rng = &mut self.rng;
        let results = run_rounds(rounds, || {
            let roll = roll_percentile(bonus, penalty, &mut *rng);
            let check = classify_check(roll.value, value, &config);
            lines.push(render_check(&roll, &check));
            check
        });

        let text = if rounds == 1 {
            format!("{canonical}: {}", lines.join("\n"))
        } else {
            let successes = results.iter().filter(|r| r.level.is_success()).count();
            format!(
                "{canonical} x{rounds}:\n{}\n{successes}/{rounds} successful",
                lines.join("\n")
            )
        };
        if hidden {
            Ok(Reply::private(text))
        } else {
            Ok(Reply::public(text))
        }
    }

    fn san_check(
        &mut self,
        ctx: &CommandContext<'_>,
        success_loss: &str,
        failure_loss: &str,
    ) -> BotResult<Reply> {
        let mut sheet = self
            .characters
            .character(ctx.user)
            .ok_or(BotError::NoCharacter)?;
        let success = parse(success_loss)?;
        let failure = parse(failure_loss)?;

        let outcome = san_check(sheet.san, &success, &failure, &mut self.rng);
        sheet.san = outcome.new_san;
        self.characters.put_character(sheet);

        let mut text = format!(
            "SAN check D100={}/{} [{}]\nloss {} ({}), SAN {} -> {}",
            outcome.roll,
            outcome.previous_san,
            if outcome.success { "success" } else { "failure" },
            outcome.loss,
            outcome.loss_roll,
            outcome.previous_san,
            outcome.new_san,
        );
        if let Some(bout) = &outcome.madness {
            text.push_str(&format!(
                "\ntemporary madness for {} rounds: {}. {}",
                bout.duration_rounds, bout.name, bout.description
            ));
        }
        if outcome.permanent_madness {
            text.push_str("\nSAN has reached 0: permanent madness");
        }
        Ok(Reply::public(text))
    }

    fn open_opposed(
        &mut self,
        ctx: &CommandContext<'_>,
        target_user: &str,
        initiator_skill: &str,
        target_skill: &str,
        initiator_dice: (u32, u32),
        target_dice: (u32, u32),
    ) -> BotResult<Reply> {
        let (init_skill, init_value) = self.skill_target(ctx.user, initiator_skill)?;
        let (tgt_skill, tgt_value) = self.skill_target(target_user, target_skill)?;

        let config = self.rules.rule_config(ctx.channel);
        let roll = roll_percentile(initiator_dice.0, initiator_dice.1, &mut self.rng);
        let check = classify_check(roll.value, init_value, &config);

        let session = OpposedSession {
            initiator: OpposedSide {
                user: ctx.user.to_string(),
                skill: init_skill.clone(),
                skill_value: init_value,
                bonus: initiator_dice.0,
                penalty: initiator_dice.1,
                result: Some(check),
            },
            target: OpposedSide {
                user: target_user.to_string(),
                skill: tgt_skill.clone(),
                skill_value: tgt_value,
                bonus: target_dice.0,
                penalty: target_dice.1,
                result: None,
            },
        };
        self.sessions.purge_expired();
        let id = self.sessions.open(ctx.channel, session);

        Ok(Reply::public(format!(
            "opposed check [{id}] {} ({init_skill}) vs {target_user} ({tgt_skill})\n{} rolls {}\n{target_user}: answer with .ado {id}",
            ctx.user,
            ctx.user,
            render_check(&roll, &check),
        )))
    }

    fn answer_opposed(&mut self, ctx: &CommandContext<'_>, check_id: &str) -> BotResult<Reply> {
        self.sessions.purge_expired();
        let pending = self
            .sessions
            .get_mut(check_id)
            .ok_or_else(|| BotError::UnknownSession(check_id.to_string()))?;
        let config = self.rules.rule_config(&pending.channel);

        let side = pending
            .session
            .unrolled_side_mut(ctx.user)
            .ok_or(BotError::NotAParticipant)?;
        let roll = roll_percentile(side.bonus, side.penalty, &mut self.rng);
        let check = classify_check(roll.value, side.skill_value, &config);
        side.result = Some(check);
        let line = format!(
            "{} ({}) rolls {}",
            ctx.user,
            side.skill,
            render_check(&roll, &check)
        );

        let resolution = match (
            pending.session.initiator.result,
            pending.session.target.result,
        ) {
            (Some(a), Some(b)) => Some((
                oppose(&a, &b),
                pending.session.initiator.user.clone(),
                pending.session.target.user.clone(),
            )),
            _ => None,
        };

        let Some((outcome, init_user, tgt_user)) = resolution else {
            return Ok(Reply::public(format!(
                "{line}\nwaiting for the other side (.ado {check_id})"
            )));
        };
        self.sessions.close(check_id);
        let verdict = match outcome {
            OpposedOutcome::InitiatorWins => format!("{init_user} wins"),
            OpposedOutcome::TargetWins => format!("{tgt_user} wins"),
            OpposedOutcome::Draw => "a draw".to_string(),
        };
        Ok(Reply::public(format!(
            "{line}\nopposed check [{check_id}]: {verdict}"
        )))
    }

    fn import_character(&mut self, ctx: &CommandContext<'_>, payload: &str) -> BotResult<Reply> {
        let character = Character::from_payload(payload, ctx.user)?;
        let text = format!(
            "imported {}: HP {}/{}, MP {}/{}, SAN {}, luck {}, {} skills",
            character.name,
            character.hp,
            character.max_hp,
            character.mp,
            character.max_mp,
            character.san,
            character.luck,
            character.skills.len(),
        );
        self.characters.put_character(character);
        Ok(Reply::public(text))
    }

    fn show_character(&self, ctx: &CommandContext<'_>) -> BotResult<Reply> {
        let sheet = self
            .characters
            .character(ctx.user)
            .ok_or(BotError::NoCharacter)?;

        let mut text = format!(
            "{}\nHP {}/{}, MP {}/{}, SAN {}/{}, luck {}",
            sheet.name, sheet.hp, sheet.max_hp, sheet.mp, sheet.max_mp, sheet.san, sheet.max_san,
            sheet.luck,
        );
        let mut attributes: Vec<(&String, &i32)> = sheet.attributes.iter().collect();
        attributes.sort();
        if !attributes.is_empty() {
            let list: Vec<String> = attributes
                .into_iter()
                .map(|(key, value)| format!("{key} {value}"))
                .collect();
            text.push_str(&format!("\n{}", list.join(", ")));
        }
        let mut skills: Vec<(&String, &i32)> = sheet.skills.iter().collect();
        skills.sort();
        if !skills.is_empty() {
            let list: Vec<String> = skills
                .into_iter()
                .map(|(key, value)| format!("{key} {value}"))
                .collect();
            text.push_str(&format!("\n{}", list.join(", ")));
        }
        if !sheet.items.is_empty() {
            text.push_str(&format!("\nitems: {}", sheet.items.join(", ")));
        }
        Ok(Reply::public(text))
    }

    fn skill_target(&self, user: &str, skill: &str) -> BotResult<(String, u32)> {
        let canonical = self.resolver.resolve(skill);
        let sheet = self
            .characters
            .character(user)
            .ok_or(BotError::NoCharacter)?;
        let value = sheet
            .skill_value(&self.resolver, skill)
            .ok_or_else(|| BotError::UnknownSkill(skill.to_string()))?;
        Ok((canonical, u32::try_from(value.max(0)).unwrap_or(0)))
    }
}

fn render_check(roll: &PercentileRoll, check: &CheckResult) -> String {
    if roll.tens.len() > 1 {
        format!("{roll} -> {check}")
    } else {
        check.to_string()
    }
}

fn render_rule(config: &RuleConfig) -> String {
    format!(
        "{}: critical 1-{}, fumble {}-100",
        config.edition, config.crit_threshold, config.fumble_threshold
    )
}

const HELP: &str = "\
.r [r<N>|p<N>] [expr]  roll dice (default d100)
.rhd [expr]            hidden roll, result sent privately
.ra <skill> [value]    skill check against the sheet or an explicit value
.rha <skill> [value]   hidden skill check, result sent privately
.rc <skill> <value>    check against an explicit value
.sc <succ>/<fail>      sanity check with loss expressions, e.g. .sc 1/1d6
.ad @user <skill> [skill2]  opposed check; the target answers with .ado <id>
.rule [show|coc6|coc7|crit <n>|fumble <n>]  rule configuration
.set [n]               list or apply rule presets
.pc [show|import <json>]  character sheet";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::HashMap;

    fn dispatcher() -> Dispatcher<MemoryStore, MemoryStore> {
        Dispatcher::with_rng(
            MemoryStore::new(),
            MemoryStore::new(),
            StdRng::seed_from_u64(7),
        )
    }

    fn sheet(owner: &str, skills: &[(&str, i32)], san: i32) -> Character {
        Character {
            name: format!("{owner}'s investigator"),
            owner: owner.to_string(),
            attributes: HashMap::from([("STR".to_string(), 40), ("POW".to_string(), 60)]),
            skills: skills
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
            hp: 10,
            max_hp: 10,
            mp: 12,
            max_mp: 12,
            san,
            max_san: 99,
            luck: 50,
            items: vec![],
        }
    }

    fn ctx<'a>() -> CommandContext<'a> {
        CommandContext {
            user: "alice",
            channel: "table",
        }
    }

    #[test]
    fn plain_roll_reports_the_expression_and_total() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".r 3d6");
        assert!(reply.text.starts_with("3d6: ["), "got: {}", reply.text);
        assert!(!reply.private);
    }

    #[test]
    fn compact_d100_roll() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".rd100");
        assert!(reply.text.starts_with("d100: ["), "got: {}", reply.text);
    }

    #[test]
    fn bonus_dice_use_the_percentile_path() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".r r2");
        assert!(reply.text.starts_with("D100="), "got: {}", reply.text);
        assert!(reply.text.contains("bonus"), "got: {}", reply.text);
    }

    #[test]
    fn hidden_roll_replies_privately() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".rhd100");
        assert!(reply.private);
        assert!(reply.text.starts_with("d100: ["), "got: {}", reply.text);

        let reply = bot.handle(&ctx(), ".rhd 3d6");
        assert!(reply.private);
        assert!(reply.text.starts_with("3d6: ["), "got: {}", reply.text);
    }

    #[test]
    fn uppercase_d100_still_takes_the_percentile_path() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".r r2 D100");
        assert!(reply.text.starts_with("D100="), "got: {}", reply.text);
        assert!(reply.text.contains("bonus"), "got: {}", reply.text);
    }

    #[test]
    fn bonus_dice_reject_non_percentile_expressions() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".r r1 3d6");
        assert!(reply.text.contains("only apply"), "got: {}", reply.text);
    }

    #[test]
    fn parse_errors_become_reply_text() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".r 1d");
        assert!(reply.text.contains("parse error"), "got: {}", reply.text);
    }

    #[test]
    fn explicit_value_check_needs_no_sheet() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".rc 侦查 60");
        assert!(
            reply.text.starts_with("Spot Hidden: D100="),
            "got: {}",
            reply.text
        );
        assert!(reply.text.contains("/60 ["), "got: {}", reply.text);
    }

    #[test]
    fn digits_only_check_argument_gets_the_usage_reply() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".ra50");
        assert!(reply.text.starts_with("usage:"), "got: {}", reply.text);

        let reply = bot.handle(&ctx(), ".ra r2");
        assert!(reply.text.starts_with("usage:"), "got: {}", reply.text);
    }

    #[test]
    fn sheet_check_without_a_sheet_fails() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".ra侦查");
        assert!(
            reply.text.contains("no active character sheet"),
            "got: {}",
            reply.text
        );
    }

    #[test]
    fn imported_sheet_supplies_skill_values() {
        let mut bot = dispatcher();
        let reply = bot.handle(
            &ctx(),
            r#".pc import {"name": "Harvey", "skills": {"Spot Hidden": 55}, "hp": 10}"#,
        );
        assert!(reply.text.starts_with("imported Harvey"), "got: {}", reply.text);

        let reply = bot.handle(&ctx(), ".ra侦查");
        assert!(reply.text.contains("/55 ["), "got: {}", reply.text);
    }

    #[test]
    fn unknown_skill_on_the_sheet_is_reported() {
        let mut bot = dispatcher();
        bot.characters.put_character(sheet("alice", &[], 60));
        let reply = bot.handle(&ctx(), ".ra pilot");
        assert!(reply.text.contains("unknown skill"), "got: {}", reply.text);
    }

    #[test]
    fn hidden_checks_are_private() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".rha侦查50");
        assert!(reply.private);
        assert!(reply.text.contains("/50 ["), "got: {}", reply.text);
    }

    #[test]
    fn multi_round_checks_report_a_summary() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".rat3侦查50");
        assert!(reply.text.contains("x3"), "got: {}", reply.text);
        assert_eq!(reply.text.matches("D100=").count(), 3, "got: {}", reply.text);
        assert!(reply.text.contains("/3 successful"), "got: {}", reply.text);
    }

    #[test]
    fn san_check_updates_the_stored_sheet() {
        let mut bot = dispatcher();
        bot.characters.put_character(sheet("alice", &[], 60));
        let reply = bot.handle(&ctx(), ".sc 1/1");
        assert!(reply.text.starts_with("SAN check D100="), "got: {}", reply.text);
        assert_eq!(bot.characters().character("alice").map(|c| c.san), Some(59));
    }

    #[test]
    fn san_check_without_a_sheet_fails() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".sc 0/1d6");
        assert!(
            reply.text.contains("no active character sheet"),
            "got: {}",
            reply.text
        );
    }

    #[test]
    fn opposed_check_full_lifecycle() {
        let mut bot = dispatcher();
        bot.characters
            .put_character(sheet("alice", &[("Brawl", 70)], 60));
        bot.characters
            .put_character(sheet("bob", &[("Dodge", 50)], 60));

        let reply = bot.handle(&ctx(), ".ad @bob 斗殴 闪避");
        assert!(
            reply.text.starts_with("opposed check ["),
            "got: {}",
            reply.text
        );
        let id = reply
            .text
            .split('[')
            .nth(1)
            .and_then(|s| s.split(']').next())
            .expect("reply should contain the session id")
            .to_string();

        let outsider = CommandContext {
            user: "carol",
            channel: "table",
        };
        let reply = bot.handle(&outsider, &format!(".ado {id}"));
        assert!(
            reply.text.contains("not part of this opposed check"),
            "got: {}",
            reply.text
        );

        let bob = CommandContext {
            user: "bob",
            channel: "table",
        };
        let reply = bot.handle(&bob, &format!(".ado {id}"));
        assert!(
            reply.text.contains("wins") || reply.text.contains("draw"),
            "got: {}",
            reply.text
        );

        // The session is gone once resolved.
        let reply = bot.handle(&bob, &format!(".ado {id}"));
        assert!(
            reply.text.contains("unknown or expired"),
            "got: {}",
            reply.text
        );
    }

    #[test]
    fn rule_configuration_round_trip() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".rule");
        assert_eq!(reply.text, "COC7: critical 1-5, fumble 96-100");

        bot.handle(&ctx(), ".rule coc6");
        bot.handle(&ctx(), ".rule crit 3");
        let reply = bot.handle(&ctx(), ".rule");
        assert_eq!(reply.text, "COC6: critical 1-3, fumble 96-100");

        let reply = bot.handle(&ctx(), ".rule crit 0");
        assert!(
            reply.text.contains("invalid rule config"),
            "got: {}",
            reply.text
        );
        // The invalid value was not stored.
        let reply = bot.handle(&ctx(), ".rule");
        assert_eq!(reply.text, "COC6: critical 1-3, fumble 96-100");
    }

    #[test]
    fn rule_configuration_is_per_channel() {
        let mut bot = dispatcher();
        bot.handle(&ctx(), ".rule coc6");
        let other = CommandContext {
            user: "alice",
            channel: "other",
        };
        let reply = bot.handle(&other, ".rule");
        assert!(reply.text.starts_with("COC7"), "got: {}", reply.text);
    }

    #[test]
    fn presets_apply_and_list() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".set");
        assert!(reply.text.contains("COC6 classic"), "got: {}", reply.text);

        let reply = bot.handle(&ctx(), ".set 2");
        assert!(reply.text.starts_with("applied preset 2"), "got: {}", reply.text);
        let reply = bot.handle(&ctx(), ".rule");
        assert!(reply.text.starts_with("COC6"), "got: {}", reply.text);

        let reply = bot.handle(&ctx(), ".set 9");
        assert!(reply.text.contains("no preset 9"), "got: {}", reply.text);
    }

    #[test]
    fn show_character_lists_the_sheet() {
        let mut bot = dispatcher();
        bot.characters
            .put_character(sheet("alice", &[("Spot Hidden", 55)], 60));
        let reply = bot.handle(&ctx(), ".pc");
        assert!(reply.text.contains("HP 10/10"), "got: {}", reply.text);
        assert!(reply.text.contains("Spot Hidden 55"), "got: {}", reply.text);
    }

    #[test]
    fn unknown_commands_point_at_help() {
        let mut bot = dispatcher();
        let reply = bot.handle(&ctx(), ".frobnicate");
        assert!(reply.text.contains("try .help"), "got: {}", reply.text);
        let reply = bot.handle(&ctx(), ".help");
        assert!(reply.text.contains(".sc"), "got: {}", reply.text);
    }
}
