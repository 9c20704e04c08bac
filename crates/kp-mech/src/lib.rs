//! Call of Cthulhu dice mechanics engine.
//!
//! Provides dice expression parsing and evaluation, percentile rolls with
//! bonus/penalty dice, the COC6 and COC7 check rules with opposed and
//! multi-round checks, a skill alias resolver, character sheets with a
//! JSON importer, and the sanity check mechanic.
//!
//! The engine is purely computational: no I/O, no global state, and all
//! rolling functions are generic over [`rand::Rng`] so callers can inject
//! a seeded generator.

pub mod alias;
pub mod error;
pub mod expr;
pub mod percentile;
pub mod roll;
pub mod rules;
pub mod sanity;
pub mod sheet;

pub use alias::SkillResolver;
pub use error::{MechError, MechResult};
pub use expr::{BinOp, DiceExpr, DiceTerm, Keep, parse};
pub use percentile::{PercentileMode, PercentileRoll, roll_percentile};
pub use roll::{RollGroup, RollOutcome, eval};
pub use rules::{
    CheckResult, Edition, OpposedOutcome, RuleConfig, SuccessLevel, classify_check, oppose,
    run_rounds,
};
pub use sanity::{MadnessBout, SanCheckOutcome, san_check};
pub use sheet::Character;
