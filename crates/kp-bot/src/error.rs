//! Error types for the command layer.

use kp_mech::MechError;

/// Errors surfaced while executing a chat command.
///
/// Lookup failures (`NoCharacter`, `UnknownSkill`) are raised here in
/// the glue, never by the engine: the handler short-circuits before a
/// check runs when no skill value can be found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BotError {
    /// The engine rejected an expression or configuration.
    #[error(transparent)]
    Mech(#[from] MechError),

    /// The user has no active character sheet.
    #[error("no active character sheet; import one first or give an explicit value")]
    NoCharacter,

    /// Neither the sheet nor the alias table knows this skill.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// The referenced check session does not exist or has expired.
    #[error("unknown or expired check session: {0}")]
    UnknownSession(String),

    /// The user is not a participant of the referenced session.
    #[error("you are not part of this opposed check")]
    NotAParticipant,
}

/// Convenience result type for command handling.
pub type BotResult<T> = Result<T, BotError>;
