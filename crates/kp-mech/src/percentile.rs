//! Percentile rolls with bonus and penalty dice.
//!
//! A d100 is rolled as two digits: one units die and one or more tens
//! dice. Bonus dice add extra tens draws and keep the lowest digit;
//! penalty dice keep the highest. Bonus and penalty dice requested
//! together cancel pairwise before any extra dice are rolled.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound on net extra tens dice for one roll.
pub const MAX_EXTRA_DICE: u32 = 10;

/// How the tens digit of a percentile roll was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentileMode {
    /// A plain d100: one tens die, no choice to make.
    Flat,
    /// Bonus dice: the lowest of `n + 1` tens digits was kept.
    Bonus(u32),
    /// Penalty dice: the highest of `n + 1` tens digits was kept.
    Penalty(u32),
}

impl fmt::Display for PercentileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "d100"),
            Self::Bonus(n) => write!(f, "d100 with {n} bonus"),
            Self::Penalty(n) => write!(f, "d100 with {n} penalty"),
        }
    }
}

/// A resolved percentile roll with its full digit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentileRoll {
    /// Final roll value in `1..=100`.
    pub value: u32,
    /// The fixed units digit, drawn once.
    pub units: u8,
    /// Every tens digit drawn, in draw order.
    pub tens: Vec<u8>,
    /// The tens digit that was kept.
    pub chosen_tens: u8,
    /// Which selection rule applied.
    pub mode: PercentileMode,
}

impl fmt::Display for PercentileRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D100={}", self.value)?;
        if self.tens.len() > 1 {
            let digits: Vec<String> = self.tens.iter().map(u8::to_string).collect();
            write!(
                f,
                " ({}, tens [{}] kept {}, units {})",
                self.mode,
                digits.join(", "),
                self.chosen_tens,
                self.units
            )?;
        }
        Ok(())
    }
}

/// Roll a d100 with `bonus` bonus dice and `penalty` penalty dice.
///
/// The two kinds cancel pairwise first; the net count (capped at
/// [`MAX_EXTRA_DICE`]) is applied in the surviving mode. A net of zero
/// degenerates to a plain roll through the same digit decomposition.
/// A kept tens of 0 with units 0 reads as 100.
pub fn roll_percentile<R: Rng + ?Sized>(bonus: u32, penalty: u32, rng: &mut R) -> PercentileRoll {
    let net = i64::from(bonus) - i64::from(penalty);
    let extra = u32::try_from(net.unsigned_abs()).unwrap_or(MAX_EXTRA_DICE).min(MAX_EXTRA_DICE);
    let mode = if net > 0 {
        PercentileMode::Bonus(extra)
    } else if net < 0 {
        PercentileMode::Penalty(extra)
    } else {
        PercentileMode::Flat
    };

    let units: u8 = rng.random_range(0..=9);
    let tens: Vec<u8> = (0..=extra).map(|_| rng.random_range(0..=9)).collect();
    let chosen_tens = match mode {
        PercentileMode::Bonus(_) => tens.iter().copied().min().unwrap_or(0),
        PercentileMode::Penalty(_) => tens.iter().copied().max().unwrap_or(0),
        PercentileMode::Flat => tens.first().copied().unwrap_or(0),
    };

    let raw = u32::from(chosen_tens) * 10 + u32::from(units);
    let value = if raw == 0 { 100 } else { raw };

    PercentileRoll {
        value,
        units,
        tens,
        chosen_tens,
        mode,
    }
}
