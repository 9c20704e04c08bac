//! Chat command layer for the keeper dice assistant.
//!
//! Everything here is glue around the [`kp_mech`] engine: a command
//! parser for the dot-prefixed chat syntax (`.r`, `.rhd`, `.ra`, `.rc`,
//! `.rha`, `.sc`, `.ad`, `.rule`, `.set`, `.pc`), storage contracts for
//! character sheets and rule configuration, a registry for pending and
//! opposed check sessions, and a dispatcher that turns a command string
//! into a text reply. The exact reply markup lives here, never in the
//! engine.

pub mod command;
pub mod error;
pub mod handler;
pub mod session;
pub mod store;

pub use command::{Command, parse_command};
pub use error::{BotError, BotResult};
pub use handler::{CommandContext, Dispatcher, Reply};
pub use session::{OpposedSession, OpposedSide, PendingCheck, SessionRegistry};
pub use store::{CharacterStore, MemoryStore, RuleStore};
