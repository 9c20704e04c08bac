//! Dice expression trees.
//!
//! An expression is a left-to-right chain of dice terms and constants
//! joined by `+` and `-`, e.g. `1d100`, `3d6+5`, `d6+d4-1`, `4d6k3`.
//! Trees are immutable once parsed; evaluation lives in [`crate::roll`].

mod lexer;
mod parser;

pub use parser::{MAX_DICE_PER_TERM, MAX_FACES, MAX_TOTAL_DICE, parse};

use std::fmt;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
        }
    }
}

/// Which rolled dice of a term are kept for the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keep {
    /// Keep the `n` highest values (`4d6k3`).
    Highest(u32),
    /// Keep the `n` lowest values (`4d6kl3`).
    Lowest(u32),
}

/// A single `NdM` dice term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceTerm {
    /// How many dice to roll (1 when the count is omitted).
    pub count: u32,
    /// Number of faces per die.
    pub faces: u32,
    /// Optional keep-highest/keep-lowest rule.
    pub keep: Option<Keep>,
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.faces)?;
        match self.keep {
            Some(Keep::Highest(n)) => write!(f, "k{n}"),
            Some(Keep::Lowest(n)) => write!(f, "kl{n}"),
            None => Ok(()),
        }
    }
}

/// A parsed dice expression.
///
/// Every leaf is either a [`DiceExpr::Constant`] or a [`DiceExpr::Dice`]
/// term; interior nodes are binary `+`/`-` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiceExpr {
    /// An integer constant.
    Constant(i64),
    /// A dice term.
    Dice(DiceTerm),
    /// A binary operation over two sub-expressions.
    Binary {
        /// The operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<DiceExpr>,
        /// Right operand.
        rhs: Box<DiceExpr>,
    },
}

impl DiceExpr {
    /// Total number of dice rolled across all terms of the expression.
    pub fn total_dice(&self) -> u32 {
        match self {
            Self::Constant(_) => 0,
            Self::Dice(term) => term.count,
            Self::Binary { lhs, rhs, .. } => lhs.total_dice() + rhs.total_dice(),
        }
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "{v}"),
            Self::Dice(term) => write!(f, "{term}"),
            Self::Binary { op, lhs, rhs } => write!(f, "{lhs}{op}{rhs}"),
        }
    }
}
