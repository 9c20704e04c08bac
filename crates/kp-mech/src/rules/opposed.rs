//! Opposed checks: two parties roll against their own skills.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CheckResult;

/// Who won an opposed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpposedOutcome {
    /// The initiating side won.
    InitiatorWins,
    /// The opposing side won.
    TargetWins,
    /// Neither side won; callers must handle this explicitly.
    Draw,
}

impl fmt::Display for OpposedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitiatorWins => write!(f, "initiator wins"),
            Self::TargetWins => write!(f, "target wins"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// Compare two check results.
///
/// The strictly higher success tier wins; a tied tier falls back to the
/// higher raw skill value; a full tie is a [`OpposedOutcome::Draw`].
pub fn oppose(initiator: &CheckResult, target: &CheckResult) -> OpposedOutcome {
    match initiator
        .level
        .cmp(&target.level)
        .then(initiator.skill.cmp(&target.skill))
    {
        std::cmp::Ordering::Greater => OpposedOutcome::InitiatorWins,
        std::cmp::Ordering::Less => OpposedOutcome::TargetWins,
        std::cmp::Ordering::Equal => OpposedOutcome::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SuccessLevel;

    fn result(roll: u32, skill: u32, level: SuccessLevel) -> CheckResult {
        CheckResult { roll, skill, level }
    }

    #[test]
    fn higher_tier_wins_regardless_of_skill() {
        let a = result(20, 30, SuccessLevel::HardSuccess);
        let b = result(50, 90, SuccessLevel::NormalSuccess);
        assert_eq!(oppose(&a, &b), OpposedOutcome::InitiatorWins);
        assert_eq!(oppose(&b, &a), OpposedOutcome::TargetWins);
    }

    #[test]
    fn tied_tier_falls_back_to_skill_value() {
        let a = result(40, 60, SuccessLevel::NormalSuccess);
        let b = result(30, 40, SuccessLevel::NormalSuccess);
        assert_eq!(oppose(&a, &b), OpposedOutcome::InitiatorWins);
        assert_eq!(oppose(&b, &a), OpposedOutcome::TargetWins);
    }

    #[test]
    fn full_tie_is_an_explicit_draw() {
        let a = result(3, 50, SuccessLevel::CriticalSuccess);
        let b = result(4, 50, SuccessLevel::CriticalSuccess);
        assert_eq!(oppose(&a, &b), OpposedOutcome::Draw);
    }

    #[test]
    fn fumble_loses_to_everything() {
        let fumble = result(100, 90, SuccessLevel::Fumble);
        let failure = result(70, 20, SuccessLevel::Failure);
        assert_eq!(oppose(&failure, &fumble), OpposedOutcome::InitiatorWins);
    }
}
