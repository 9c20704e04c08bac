//! Error types for the mechanics engine.

/// Errors that can occur while parsing expressions, importing sheets,
/// or changing rule configuration.
///
/// Classification itself never fails: a [`crate::rules::RuleConfig`] is
/// validated when it is changed, not when it is used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// The dice expression text is malformed.
    #[error("parse error at position {position}: {reason}")]
    Parse {
        /// Byte offset of the offending token in the input.
        position: usize,
        /// Human-readable description of what went wrong.
        reason: String,
    },

    /// The expression asks for more dice than the safety bound allows.
    ///
    /// Kept distinct from [`MechError::Parse`] so users get a precise
    /// "too many dice" message instead of a generic parse failure.
    #[error("too many dice: {requested} requested, at most {limit} allowed")]
    TooManyDice {
        /// How many dice the expression would roll.
        requested: u32,
        /// The enforced maximum.
        limit: u32,
    },

    /// A rule configuration value is out of range.
    #[error("invalid rule config: {0}")]
    InvalidConfig(String),

    /// A character payload could not be imported.
    #[error("invalid character payload: {0}")]
    InvalidPayload(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
