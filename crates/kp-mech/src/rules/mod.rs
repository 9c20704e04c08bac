//! Check rules: rule configuration, outcome classification, and rounds.
//!
//! Two editions are supported. COC7 grades successes into critical,
//! extreme, hard, and regular tiers with a skill-dependent fumble band;
//! COC6 only knows success and failure plus the critical/fumble extremes.
//! A [`RuleConfig`] is owned per rule-group (e.g. per channel) by the
//! storage collaborator and passed into every classification call.

pub mod opposed;
pub mod preset;

pub use opposed::{OpposedOutcome, oppose};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Which rulebook edition governs a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edition {
    /// Sixth edition: flat success/failure with critical and fumble bands.
    Coc6,
    /// Seventh edition: tiered successes and a skill-dependent fumble band.
    Coc7,
}

impl Edition {
    /// Parse an edition name like `coc6` or `COC7`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coc6" => Some(Self::Coc6),
            "coc7" => Some(Self::Coc7),
            _ => None,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coc6 => write!(f, "COC6"),
            Self::Coc7 => write!(f, "COC7"),
        }
    }
}

/// Thresholds and edition for one rule-group.
///
/// Mutated only through explicit rule-change commands; [`RuleConfig::validate`]
/// runs at configuration time so classification can assume valid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Governing edition.
    pub edition: Edition,
    /// Rolls at or below this are critical successes.
    pub crit_threshold: u32,
    /// Start of the fumble band (COC6 always; COC7 only when skill < 50).
    pub fumble_threshold: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            edition: Edition::Coc7,
            crit_threshold: 5,
            fumble_threshold: 96,
        }
    }
}

impl RuleConfig {
    /// Check that the thresholds are in their accepted ranges.
    ///
    /// Criticals may start at 1..=20, fumbles at 80..=100.
    pub fn validate(&self) -> MechResult<()> {
        if !(1..=20).contains(&self.crit_threshold) {
            return Err(MechError::InvalidConfig(format!(
                "critical threshold must be within 1..=20, got {}",
                self.crit_threshold
            )));
        }
        if !(80..=100).contains(&self.fumble_threshold) {
            return Err(MechError::InvalidConfig(format!(
                "fumble threshold must be within 80..=100, got {}",
                self.fumble_threshold
            )));
        }
        Ok(())
    }
}

/// How well a check went, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SuccessLevel {
    /// A critical failure.
    Fumble,
    /// A plain failure.
    Failure,
    /// Roll at or under the skill value.
    NormalSuccess,
    /// Roll at or under half the skill value (COC7 only).
    HardSuccess,
    /// Roll at or under a fifth of the skill value (COC7 only).
    ExtremeSuccess,
    /// Roll within the critical band.
    CriticalSuccess,
}

impl SuccessLevel {
    /// True for any success tier.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::NormalSuccess | Self::HardSuccess | Self::ExtremeSuccess | Self::CriticalSuccess
        )
    }
}

impl fmt::Display for SuccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fumble => write!(f, "Fumble"),
            Self::Failure => write!(f, "Failure"),
            Self::NormalSuccess => write!(f, "Success"),
            Self::HardSuccess => write!(f, "Hard Success"),
            Self::ExtremeSuccess => write!(f, "Extreme Success"),
            Self::CriticalSuccess => write!(f, "Critical Success"),
        }
    }
}

/// One classified d100 check.
///
/// A derived value: recomputed from `roll` and `skill` on demand, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The d100 roll, 1..=100.
    pub roll: u32,
    /// The skill value the roll was tested against.
    pub skill: u32,
    /// The graded outcome.
    pub level: SuccessLevel,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D100={}/{} [{}]", self.roll, self.skill, self.level)
    }
}

/// Classify a roll against a skill value under the given configuration.
///
/// Assumes an already-validated [`RuleConfig`] and never fails.
pub fn classify_check(roll: u32, skill: u32, config: &RuleConfig) -> CheckResult {
    let level = match config.edition {
        Edition::Coc6 => classify_coc6(roll, skill, config),
        Edition::Coc7 => classify_coc7(roll, skill, config),
    };
    CheckResult { roll, skill, level }
}

fn classify_coc6(roll: u32, skill: u32, config: &RuleConfig) -> SuccessLevel {
    // The fumble band outranks an otherwise-passing skill value.
    if roll <= config.crit_threshold {
        SuccessLevel::CriticalSuccess
    } else if roll >= config.fumble_threshold {
        SuccessLevel::Fumble
    } else if roll <= skill {
        SuccessLevel::NormalSuccess
    } else {
        SuccessLevel::Failure
    }
}

fn classify_coc7(roll: u32, skill: u32, config: &RuleConfig) -> SuccessLevel {
    if roll <= config.crit_threshold {
        SuccessLevel::CriticalSuccess
    } else if roll <= skill / 5 {
        SuccessLevel::ExtremeSuccess
    } else if roll <= skill / 2 {
        SuccessLevel::HardSuccess
    } else if roll <= skill {
        SuccessLevel::NormalSuccess
    } else if (skill < 50 && roll >= config.fumble_threshold) || (skill >= 50 && roll == 100) {
        SuccessLevel::Fumble
    } else {
        SuccessLevel::Failure
    }
}

/// Run `rounds` independent checks and collect their results in order.
///
/// Each round draws fresh dice; no round sees a previous round's outcome.
pub fn run_rounds<F>(rounds: u32, mut round: F) -> Vec<CheckResult>
where
    F: FnMut() -> CheckResult,
{
    (0..rounds).map(|_| round()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coc7(crit: u32, fumble: u32) -> RuleConfig {
        RuleConfig {
            edition: Edition::Coc7,
            crit_threshold: crit,
            fumble_threshold: fumble,
        }
    }

    fn coc6(crit: u32, fumble: u32) -> RuleConfig {
        RuleConfig {
            edition: Edition::Coc6,
            crit_threshold: crit,
            fumble_threshold: fumble,
        }
    }

    #[test]
    fn coc7_tiers() {
        let config = coc7(5, 96);
        assert_eq!(
            classify_check(3, 50, &config).level,
            SuccessLevel::CriticalSuccess
        );
        assert_eq!(
            classify_check(10, 50, &config).level,
            SuccessLevel::ExtremeSuccess
        );
        assert_eq!(
            classify_check(25, 50, &config).level,
            SuccessLevel::HardSuccess
        );
        assert_eq!(
            classify_check(50, 50, &config).level,
            SuccessLevel::NormalSuccess
        );
        assert_eq!(classify_check(51, 50, &config).level, SuccessLevel::Failure);
    }

    #[test]
    fn coc7_fumble_band_depends_on_skill() {
        let config = coc7(5, 96);
        // Low skill: the whole 96..=100 band fumbles.
        assert_eq!(classify_check(97, 40, &config).level, SuccessLevel::Fumble);
        // High skill: only a natural 100 fumbles.
        assert_eq!(classify_check(97, 60, &config).level, SuccessLevel::Failure);
        assert_eq!(classify_check(100, 60, &config).level, SuccessLevel::Fumble);
    }

    #[test]
    fn coc7_fumble_threshold_shifts_the_low_skill_band() {
        let config = coc7(5, 99);
        assert_eq!(classify_check(97, 40, &config).level, SuccessLevel::Failure);
        assert_eq!(classify_check(99, 40, &config).level, SuccessLevel::Fumble);
    }

    #[test]
    fn coc6_has_no_intermediate_tiers() {
        let config = coc6(5, 96);
        assert_eq!(
            classify_check(30, 60, &config).level,
            SuccessLevel::NormalSuccess
        );
        assert_eq!(classify_check(7, 60, &config).level, SuccessLevel::NormalSuccess);
        assert_eq!(classify_check(61, 60, &config).level, SuccessLevel::Failure);
    }

    #[test]
    fn coc6_fumble_band_beats_a_passing_skill() {
        let config = coc6(5, 96);
        assert_eq!(classify_check(96, 80, &config).level, SuccessLevel::Fumble);
        assert_eq!(classify_check(96, 97, &config).level, SuccessLevel::Fumble);
    }

    #[test]
    fn crit_takes_priority_over_a_failing_skill() {
        let config = coc6(5, 96);
        assert_eq!(
            classify_check(5, 1, &config).level,
            SuccessLevel::CriticalSuccess
        );
        let config = coc7(5, 96);
        assert_eq!(
            classify_check(5, 1, &config).level,
            SuccessLevel::CriticalSuccess
        );
    }

    #[test]
    fn level_ordering_matches_tier_strength() {
        assert!(SuccessLevel::CriticalSuccess > SuccessLevel::ExtremeSuccess);
        assert!(SuccessLevel::ExtremeSuccess > SuccessLevel::HardSuccess);
        assert!(SuccessLevel::HardSuccess > SuccessLevel::NormalSuccess);
        assert!(SuccessLevel::NormalSuccess > SuccessLevel::Failure);
        assert!(SuccessLevel::Failure > SuccessLevel::Fumble);
    }

    #[test]
    fn validate_rejects_out_of_range_thresholds() {
        assert!(coc7(0, 96).validate().is_err());
        assert!(coc7(21, 96).validate().is_err());
        assert!(coc7(5, 79).validate().is_err());
        assert!(coc7(5, 101).validate().is_err());
        assert!(coc7(5, 96).validate().is_ok());
        assert!(coc7(1, 100).validate().is_ok());
    }

    #[test]
    fn run_rounds_returns_one_result_per_round() {
        let mut counter = 0;
        let results = run_rounds(3, || {
            counter += 1;
            CheckResult {
                roll: counter,
                skill: 50,
                level: SuccessLevel::NormalSuccess,
            }
        });
        assert_eq!(results.len(), 3);
        let rolls: Vec<u32> = results.iter().map(|r| r.roll).collect();
        assert_eq!(rolls, vec![1, 2, 3]);
    }

    #[test]
    fn rounds_draw_independent_rolls() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let config = RuleConfig::default();
        let mut rng = StdRng::seed_from_u64(17);
        let results = run_rounds(100, || {
            let roll = crate::percentile::roll_percentile(0, 0, &mut rng).value;
            classify_check(roll, 50, &config)
        });
        assert_eq!(results.len(), 100);
        // A correlated sequence would repeat a single value; a hundred
        // independent d100 draws essentially never do.
        let distinct: std::collections::HashSet<u32> =
            results.iter().map(|r| r.roll).collect();
        assert!(distinct.len() > 10);
    }

    #[test]
    fn edition_parse_and_display() {
        assert_eq!(Edition::parse("coc6"), Some(Edition::Coc6));
        assert_eq!(Edition::parse(" COC7 "), Some(Edition::Coc7));
        assert_eq!(Edition::parse("dnd"), None);
        assert_eq!(Edition::Coc7.to_string(), "COC7");
    }

    #[test]
    fn check_result_display() {
        let result = CheckResult {
            roll: 45,
            skill: 60,
            level: SuccessLevel::NormalSuccess,
        };
        assert_eq!(result.to_string(), "D100=45/60 [Success]");
    }
}
