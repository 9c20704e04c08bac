//! Pending opposed-check sessions.
//!
//! An opposed check spans two messages: `.ad` opens a session and rolls
//! the initiator, `.ado <id>` lets the target answer. Open sessions are
//! parked here under a short id and expire after ten minutes; expired
//! entries are swept on every registry access from the dispatcher.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use kp_mech::rules::CheckResult;
use uuid::Uuid;

/// Seconds before an unanswered session expires.
pub const SESSION_TTL_SECS: i64 = 600;

/// Length of the short session id shown to users.
const ID_LEN: usize = 8;

/// One participant of an opposed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpposedSide {
    /// User key of this participant.
    pub user: String,
    /// Canonical skill name rolled by this side.
    pub skill: String,
    /// Skill value captured when the session opened.
    pub skill_value: u32,
    /// Bonus dice for this side.
    pub bonus: u32,
    /// Penalty dice for this side.
    pub penalty: u32,
    /// The side's check result, once rolled.
    pub result: Option<CheckResult>,
}

/// The two sides of an open opposed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpposedSession {
    /// The side that opened the check.
    pub initiator: OpposedSide,
    /// The side being challenged.
    pub target: OpposedSide,
}

impl OpposedSession {
    /// The side still waiting to roll for `user`, if any.
    pub fn unrolled_side_mut(&mut self, user: &str) -> Option<&mut OpposedSide> {
        [&mut self.initiator, &mut self.target]
            .into_iter()
            .find(|side| side.user == user && side.result.is_none())
    }

    /// True once both sides have rolled.
    pub fn complete(&self) -> bool {
        self.initiator.result.is_some() && self.target.result.is_some()
    }
}

/// An opposed session parked in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheck {
    /// Short id the target quotes in `.ado`.
    pub id: String,
    /// Channel the check was opened in.
    pub channel: String,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
    /// The check itself.
    pub session: OpposedSession,
}

impl PendingCheck {
    fn expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::seconds(SESSION_TTL_SECS)
    }
}

/// In-memory registry of open opposed checks.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, PendingCheck>,
}

impl SessionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a session and return its generated short id.
    pub fn open(&mut self, channel: &str, session: OpposedSession) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        self.sessions.insert(
            id.clone(),
            PendingCheck {
                id: id.clone(),
                channel: channel.to_string(),
                created_at: Utc::now(),
                session,
            },
        );
        id
    }

    /// Look up an open session by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut PendingCheck> {
        self.sessions.get_mut(id)
    }

    /// Remove a session, typically once resolved.
    pub fn close(&mut self, id: &str) -> Option<PendingCheck> {
        self.sessions.remove(id)
    }

    /// Drop every session past its TTL.
    pub fn purge_expired(&mut self) {
        let now = Utc::now();
        self.sessions.retain(|_, pending| !pending.expired(now));
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no session is open.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
