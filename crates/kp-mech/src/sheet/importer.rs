//! Character import from the web form's JSON payload.
//!
//! The character-creation form submits a JSON object with a `name`, the
//! characteristic and skill maps, and optional pools. Everything beyond
//! the name has a defined default: SAN falls back to POW, luck to LUK,
//! and the Cthulhu Mythos skill always exists (at 0 when absent).

use std::collections::HashMap;

use serde::Deserialize;

use super::Character;
use crate::error::{MechError, MechResult};

/// Canonical key of the always-present mythos skill.
const MYTHOS_SKILL: &str = "Cthulhu Mythos";

#[derive(Debug, Deserialize)]
struct Payload {
    name: String,
    #[serde(default)]
    attributes: HashMap<String, i32>,
    #[serde(default)]
    skills: HashMap<String, i32>,
    #[serde(default)]
    hp: i32,
    #[serde(default)]
    mp: i32,
    #[serde(default)]
    san: Option<i32>,
    #[serde(default)]
    luck: Option<i32>,
    #[serde(default)]
    items: Vec<ItemSpec>,
}

/// Items arrive either as bare names or as `{name, slot}` objects;
/// only the name is kept.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemSpec {
    Name(String),
    Slotted {
        name: String,
        #[serde(default)]
        #[allow(dead_code)]
        slot: Option<String>,
    },
}

impl ItemSpec {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Slotted { name, .. } => name,
        }
    }
}

impl Character {
    /// Build a character from a web-form JSON payload.
    ///
    /// Fails with [`MechError::InvalidPayload`] on malformed JSON or a
    /// missing `name`.
    pub fn from_payload(json: &str, owner: &str) -> MechResult<Self> {
        let payload: Payload = serde_json::from_str(json)
            .map_err(|err| MechError::InvalidPayload(err.to_string()))?;
        if payload.name.trim().is_empty() {
            return Err(MechError::InvalidPayload("missing field: name".to_string()));
        }

        let mut skills = payload.skills;
        skills.entry(MYTHOS_SKILL.to_string()).or_insert(0);

        let san = payload
            .san
            .unwrap_or_else(|| payload.attributes.get("POW").copied().unwrap_or(0));
        let luck = payload
            .attributes
            .get("LUK")
            .copied()
            .or(payload.luck)
            .unwrap_or(0);

        Ok(Self {
            name: payload.name,
            owner: owner.to_string(),
            attributes: payload.attributes,
            skills,
            hp: payload.hp,
            max_hp: payload.hp,
            mp: payload.mp,
            max_mp: payload.mp,
            san,
            max_san: 99,
            luck,
            items: payload.items.into_iter().map(ItemSpec::into_name).collect(),
        })
    }
}
