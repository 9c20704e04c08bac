//! Numbered rule presets for quick switching.
//!
//! These produce the same [`RuleConfig`] a user could assemble through
//! individual threshold commands, under a single preset number.

use super::{Edition, RuleConfig};

/// A named, numbered rule preset.
#[derive(Debug, Clone, Copy)]
pub struct RulePreset {
    /// Preset number as typed by the user.
    pub id: u8,
    /// Short display name.
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// The configuration the preset applies.
    pub config: RuleConfig,
}

/// COC7 with book-standard thresholds.
pub fn coc7_standard() -> RuleConfig {
    RuleConfig {
        edition: Edition::Coc7,
        crit_threshold: 5,
        fumble_threshold: 96,
    }
}

/// COC6 with the classic critical and fumble bands.
pub fn coc6_classic() -> RuleConfig {
    RuleConfig {
        edition: Edition::Coc6,
        crit_threshold: 5,
        fumble_threshold: 96,
    }
}

/// COC7 where only a natural 1 crits.
pub fn coc7_hardcore() -> RuleConfig {
    RuleConfig {
        edition: Edition::Coc7,
        crit_threshold: 1,
        fumble_threshold: 96,
    }
}

/// All presets in menu order.
pub fn all() -> [RulePreset; 3] {
    [
        RulePreset {
            id: 1,
            name: "COC7 standard",
            summary: "crit 1-5, low-skill fumble 96-100",
            config: coc7_standard(),
        },
        RulePreset {
            id: 2,
            name: "COC6 classic",
            summary: "flat success, crit 1-5, fumble 96-100",
            config: coc6_classic(),
        },
        RulePreset {
            id: 3,
            name: "COC7 hardcore",
            summary: "only a natural 1 crits",
            config: coc7_hardcore(),
        },
    ]
}

/// Look up a preset configuration by number.
pub fn by_id(id: u8) -> Option<RulePreset> {
    all().into_iter().find(|preset| preset.id == id)
}
