//! Storage contracts for sheets and rule configuration.
//!
//! The dispatcher only sees these traits. The in-memory implementation
//! backs tests and single-process deployments; a persistent backend
//! implements the same two traits.

use std::collections::HashMap;

use kp_mech::rules::RuleConfig;
use kp_mech::sheet::Character;

/// Character sheet storage, keyed by owning user.
pub trait CharacterStore {
    /// Fetch the active sheet for a user.
    fn character(&self, user: &str) -> Option<Character>;

    /// Store a sheet under its owner, replacing any previous one.
    fn put_character(&mut self, character: Character);
}

/// Rule configuration storage, keyed by channel.
///
/// Validation happens in the dispatcher before a config is stored;
/// the store holds whatever it is given.
pub trait RuleStore {
    /// The active configuration for a channel, or the default.
    fn rule_config(&self, channel: &str) -> RuleConfig;

    /// Replace a channel's configuration.
    fn put_rule_config(&mut self, channel: &str, config: RuleConfig);
}

/// Hash-map backed store for both contracts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    characters: HashMap<String, Character>,
    rules: HashMap<String, RuleConfig>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterStore for MemoryStore {
    fn character(&self, user: &str) -> Option<Character> {
        self.characters.get(user).cloned()
    }

    fn put_character(&mut self, character: Character) {
        self.characters.insert(character.owner.clone(), character);
    }
}

impl RuleStore for MemoryStore {
    fn rule_config(&self, channel: &str) -> RuleConfig {
        self.rules.get(channel).copied().unwrap_or_default()
    }

    fn put_rule_config(&mut self, channel: &str, config: RuleConfig) {
        self.rules.insert(channel.to_string(), config);
    }
}
