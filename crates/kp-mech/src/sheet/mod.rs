//! Character sheets.
//!
//! A sheet carries the numbers the rule engine needs — characteristic
//! and skill values — plus the pools (HP, MP, SAN) the glue layers
//! mutate. The engine never owns character data; sheets live in the
//! storage collaborator and are passed in by value.

pub mod importer;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::alias::SkillResolver;

/// A player character or NPC sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character name.
    pub name: String,
    /// Key of the user who owns this sheet.
    pub owner: String,
    /// Characteristic values by canonical key (STR, DEX, ...).
    #[serde(default)]
    pub attributes: HashMap<String, i32>,
    /// Skill values by canonical skill name.
    #[serde(default)]
    pub skills: HashMap<String, i32>,
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Current magic points.
    pub mp: i32,
    /// Maximum magic points.
    pub max_mp: i32,
    /// Current sanity.
    pub san: i32,
    /// Maximum sanity.
    pub max_san: i32,
    /// Luck value.
    pub luck: i32,
    /// Carried items by name.
    #[serde(default)]
    pub items: Vec<String>,
}

impl Character {
    /// Look up a skill or characteristic value by free-text name.
    ///
    /// The name is resolved through the alias table first; skills are
    /// checked before characteristics.
    pub fn skill_value(&self, resolver: &SkillResolver, name: &str) -> Option<i32> {
        let canonical = resolver.resolve(name);
        if let Some(&value) = self.skills.get(&canonical) {
            return Some(value);
        }
        self.attributes.get(canonical.to_uppercase().as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Character {
        Character {
            name: "Harvey Walters".to_string(),
            owner: "user-1".to_string(),
            attributes: HashMap::from([("STR".to_string(), 40), ("POW".to_string(), 65)]),
            skills: HashMap::from([
                ("Spot Hidden".to_string(), 55),
                ("Listen".to_string(), 40),
            ]),
            hp: 10,
            max_hp: 10,
            mp: 13,
            max_mp: 13,
            san: 65,
            max_san: 99,
            luck: 50,
            items: vec![],
        }
    }

    #[test]
    fn skill_lookup_goes_through_aliases() {
        let resolver = SkillResolver::new();
        let character = sample();
        assert_eq!(character.skill_value(&resolver, "侦查"), Some(55));
        assert_eq!(character.skill_value(&resolver, "spot"), Some(55));
    }

    #[test]
    fn attributes_are_found_after_skills() {
        let resolver = SkillResolver::new();
        let character = sample();
        assert_eq!(character.skill_value(&resolver, "力量"), Some(40));
        assert_eq!(character.skill_value(&resolver, "pow"), Some(65));
    }

    #[test]
    fn unknown_names_yield_none() {
        let resolver = SkillResolver::new();
        let character = sample();
        assert_eq!(character.skill_value(&resolver, "Pilot"), None);
    }
}
