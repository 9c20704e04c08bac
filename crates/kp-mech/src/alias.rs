//! Skill and attribute alias resolution.
//!
//! User input names skills in many spellings — abbreviations, synonyms,
//! and Chinese forms from imported sheets. The resolver normalizes a
//! free-text name to the canonical key used on character sheets. Unknown
//! names pass through unchanged so user-defined skills keep working.

use std::collections::HashMap;

/// The nine canonical characteristic keys.
pub const ATTRIBUTE_KEYS: [&str; 9] = [
    "STR", "CON", "SIZ", "DEX", "APP", "INT", "POW", "EDU", "LUK",
];

/// Built-in attribute aliases, lowercase alias to canonical key.
const ATTRIBUTE_ALIASES: &[(&str, &str)] = &[
    ("str", "STR"),
    ("strength", "STR"),
    ("力量", "STR"),
    ("con", "CON"),
    ("constitution", "CON"),
    ("体质", "CON"),
    ("siz", "SIZ"),
    ("size", "SIZ"),
    ("体型", "SIZ"),
    ("dex", "DEX"),
    ("dexterity", "DEX"),
    ("敏捷", "DEX"),
    ("app", "APP"),
    ("appearance", "APP"),
    ("外貌", "APP"),
    ("int", "INT"),
    ("intelligence", "INT"),
    ("智力", "INT"),
    ("灵感", "INT"),
    ("pow", "POW"),
    ("power", "POW"),
    ("意志", "POW"),
    ("精神", "POW"),
    ("edu", "EDU"),
    ("education", "EDU"),
    ("教育", "EDU"),
    ("知识", "EDU"),
    ("luk", "LUK"),
    ("luck", "LUK"),
    ("幸运", "LUK"),
    ("运气", "LUK"),
];

/// Built-in skill aliases, lowercase alias to canonical key.
const SKILL_ALIASES: &[(&str, &str)] = &[
    ("spot hidden", "Spot Hidden"),
    ("spot", "Spot Hidden"),
    ("侦查", "Spot Hidden"),
    ("观察", "Spot Hidden"),
    ("搜索", "Spot Hidden"),
    ("listen", "Listen"),
    ("聆听", "Listen"),
    ("倾听", "Listen"),
    ("library use", "Library Use"),
    ("library", "Library Use"),
    ("图书馆", "Library Use"),
    ("图书馆使用", "Library Use"),
    ("psychology", "Psychology"),
    ("心理学", "Psychology"),
    ("dodge", "Dodge"),
    ("闪避", "Dodge"),
    ("躲避", "Dodge"),
    ("brawl", "Brawl"),
    ("fighting (brawl)", "Brawl"),
    ("斗殴", "Brawl"),
    ("格斗", "Brawl"),
    ("stealth", "Stealth"),
    ("潜行", "Stealth"),
    ("隐匿", "Stealth"),
    ("persuade", "Persuade"),
    ("说服", "Persuade"),
    ("劝说", "Persuade"),
    ("fast talk", "Fast Talk"),
    ("话术", "Fast Talk"),
    ("charm", "Charm"),
    ("魅惑", "Charm"),
    ("取悦", "Charm"),
    ("intimidate", "Intimidate"),
    ("恐吓", "Intimidate"),
    ("威胁", "Intimidate"),
    ("first aid", "First Aid"),
    ("急救", "First Aid"),
    ("medicine", "Medicine"),
    ("医学", "Medicine"),
    ("drive auto", "Drive Auto"),
    ("drive", "Drive Auto"),
    ("驾驶", "Drive Auto"),
    ("汽车驾驶", "Drive Auto"),
    ("electrical repair", "Electrical Repair"),
    ("电气维修", "Electrical Repair"),
    ("mechanical repair", "Mechanical Repair"),
    ("机械维修", "Mechanical Repair"),
    ("climb", "Climb"),
    ("攀爬", "Climb"),
    ("swim", "Swim"),
    ("游泳", "Swim"),
    ("jump", "Jump"),
    ("跳跃", "Jump"),
    ("throw", "Throw"),
    ("投掷", "Throw"),
    ("occult", "Occult"),
    ("神秘学", "Occult"),
    ("cthulhu mythos", "Cthulhu Mythos"),
    ("cm", "Cthulhu Mythos"),
    ("克苏鲁神话", "Cthulhu Mythos"),
];

/// Maps free-text skill and attribute names to canonical keys.
#[derive(Debug, Clone)]
pub struct SkillResolver {
    aliases: HashMap<String, String>,
}

impl Default for SkillResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillResolver {
    /// Build a resolver with the built-in alias table.
    pub fn new() -> Self {
        let mut aliases = HashMap::new();
        for (alias, canonical) in ATTRIBUTE_ALIASES.iter().chain(SKILL_ALIASES) {
            aliases.insert((*alias).to_string(), (*canonical).to_string());
        }
        Self { aliases }
    }

    /// Resolve a name to its canonical key.
    ///
    /// Lookup is case-insensitive after trimming. Names with no alias
    /// entry come back trimmed but otherwise untouched.
    pub fn resolve(&self, name: &str) -> String {
        let trimmed = name.trim();
        let key = trimmed.to_lowercase();
        self.aliases
            .get(&key)
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    /// True when the name resolves to one of the nine characteristics.
    pub fn is_attribute(&self, name: &str) -> bool {
        let resolved = self.resolve(name);
        ATTRIBUTE_KEYS.contains(&resolved.as_str())
    }

    /// Register a custom alias, overriding any built-in entry.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases
            .insert(alias.trim().to_lowercase(), canonical.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_english_and_chinese_spellings() {
        let resolver = SkillResolver::new();
        assert_eq!(resolver.resolve("spot hidden"), "Spot Hidden");
        assert_eq!(resolver.resolve("侦查"), "Spot Hidden");
        assert_eq!(resolver.resolve("观察"), "Spot Hidden");
        assert_eq!(resolver.resolve("聆听"), "Listen");
    }

    #[test]
    fn lookup_ignores_case_and_surrounding_space() {
        let resolver = SkillResolver::new();
        assert_eq!(resolver.resolve(" Spot Hidden "), "Spot Hidden");
        assert_eq!(resolver.resolve("SPOT"), "Spot Hidden");
        assert_eq!(resolver.resolve("Luck"), "LUK");
    }

    #[test]
    fn unknown_names_pass_through() {
        let resolver = SkillResolver::new();
        assert_eq!(resolver.resolve("Underwater Basket Weaving"), "Underwater Basket Weaving");
    }

    #[test]
    fn attributes_are_recognized() {
        let resolver = SkillResolver::new();
        assert!(resolver.is_attribute("str"));
        assert!(resolver.is_attribute("力量"));
        assert!(resolver.is_attribute("LUK"));
        assert!(!resolver.is_attribute("Dodge"));
    }

    #[test]
    fn custom_aliases_can_be_added() {
        let mut resolver = SkillResolver::new();
        resolver.add_alias("眼力", "Spot Hidden");
        assert_eq!(resolver.resolve("眼力"), "Spot Hidden");
    }
}
