//! Sanity checks and the temporary madness table.
//!
//! A SAN check rolls d100 against current sanity. Success and failure
//! each carry their own loss expression (`.sc 1/1d6` style). A single
//! loss of 5 or more triggers a bout of temporary madness, drawn from
//! the ten-entry symptom table; sanity reaching 0 is permanent madness.

use rand::Rng;
use serde::Serialize;

use crate::expr::DiceExpr;
use crate::roll::{RollOutcome, eval};

/// Loss at or above which a temporary madness bout triggers.
pub const MADNESS_LOSS_THRESHOLD: i64 = 5;

/// One entry of the temporary madness table.
#[derive(Debug, Clone, Copy)]
pub struct MadnessSymptom {
    /// Symptom name.
    pub name: &'static str,
    /// What happens to the investigator.
    pub description: &'static str,
}

/// The 1d10 temporary madness symptom table.
pub const TEMPORARY_MADNESS: [MadnessSymptom; 10] = [
    MadnessSymptom {
        name: "Amnesia",
        description: "The investigator remembers only the last safe place, with no memory of how they got here.",
    },
    MadnessSymptom {
        name: "Psychosomatic disability",
        description: "The investigator suffers psychosomatic blindness, deafness, or loss of a limb.",
    },
    MadnessSymptom {
        name: "Violence",
        description: "The investigator lashes out indiscriminately at friend and foe alike.",
    },
    MadnessSymptom {
        name: "Paranoia",
        description: "Everyone is watching, someone has betrayed them, nothing can be trusted.",
    },
    MadnessSymptom {
        name: "Significant person fixation",
        description: "The investigator mistakes someone present for a significant person from their background and acts accordingly.",
    },
    MadnessSymptom {
        name: "Faint",
        description: "The investigator collapses on the spot and needs 1D10 rounds to come around.",
    },
    MadnessSymptom {
        name: "Flee in panic",
        description: "The investigator flees by any means available, even the party's only vehicle.",
    },
    MadnessSymptom {
        name: "Hysteria",
        description: "The investigator breaks into extremes of laughing, crying, or screaming.",
    },
    MadnessSymptom {
        name: "Phobia",
        description: "The investigator gains a new phobia; the symptoms persist even when the feared thing is absent.",
    },
    MadnessSymptom {
        name: "Mania",
        description: "The investigator gains a new mania and the compulsion persists.",
    },
];

/// A rolled bout of temporary madness.
///
/// Serializes for logging; not deserializable because the text fields
/// borrow from the static table.
#[derive(Debug, Clone, Serialize)]
pub struct MadnessBout {
    /// The 1d10 symptom roll.
    pub symptom_roll: u32,
    /// Symptom name from the table.
    pub name: &'static str,
    /// Symptom description from the table.
    pub description: &'static str,
    /// How many rounds the bout lasts (1d10).
    pub duration_rounds: u32,
}

/// Draw a temporary madness bout: 1d10 symptom, 1d10 duration.
pub fn roll_temporary_madness<R: Rng + ?Sized>(rng: &mut R) -> MadnessBout {
    let symptom_roll = rng.random_range(1..=10u32);
    let symptom = TEMPORARY_MADNESS[symptom_roll as usize - 1];
    MadnessBout {
        symptom_roll,
        name: symptom.name,
        description: symptom.description,
        duration_rounds: rng.random_range(1..=10),
    }
}

/// Everything that happened during one SAN check.
#[derive(Debug, Clone, Serialize)]
pub struct SanCheckOutcome {
    /// The d100 roll.
    pub roll: u32,
    /// Whether the roll was at or under current sanity.
    pub success: bool,
    /// The evaluated loss roll (success or failure expression).
    pub loss_roll: RollOutcome,
    /// Sanity lost, floored at 0.
    pub loss: i64,
    /// Sanity before the check.
    pub previous_san: i32,
    /// Sanity after the loss, floored at 0.
    pub new_san: i32,
    /// The madness bout, when the loss reached the threshold.
    pub madness: Option<MadnessBout>,
    /// True when sanity hit 0 — permanent madness.
    pub permanent_madness: bool,
}

/// Run one SAN check against `current_san`.
///
/// The success and failure loss expressions are already parsed by the
/// caller; plain numbers parse as constant expressions.
pub fn san_check<R: Rng + ?Sized>(
    current_san: i32,
    success_loss: &DiceExpr,
    failure_loss: &DiceExpr,
    rng: &mut R,
) -> SanCheckOutcome {
    let roll = rng.random_range(1..=100u32);
    let success = i64::from(roll) <= i64::from(current_san);
    let loss_expr = if success { success_loss } else { failure_loss };
    let loss_roll = eval(loss_expr, rng);
    let loss = loss_roll.total.max(0);
    let new_san = i32::try_from(i64::from(current_san) - loss)
        .unwrap_or(0)
        .max(0);

    let madness = if loss >= MADNESS_LOSS_THRESHOLD {
        Some(roll_temporary_madness(rng))
    } else {
        None
    };

    SanCheckOutcome {
        roll,
        success,
        loss_roll,
        loss,
        previous_san: current_san,
        new_san,
        madness,
        permanent_madness: new_san == 0,
    }
}
