//! Roll evaluation: walking an expression tree and drawing dice.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::expr::{BinOp, DiceExpr, DiceTerm, Keep};

/// The rolled values of one dice term, in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollGroup {
    /// Number of faces on the dice in this group.
    pub faces: u32,
    /// Every value drawn, in draw order.
    pub values: Vec<u32>,
    /// The subset of values counted toward the total when a keep rule
    /// applies, sorted descending. `None` means all values count.
    pub kept: Option<Vec<u32>>,
    /// True when this term was subtracted rather than added.
    pub negated: bool,
}

impl RollGroup {
    /// Sum of the values that count toward the total, before negation.
    pub fn contribution(&self) -> i64 {
        let values = self.kept.as_deref().unwrap_or(&self.values);
        values.iter().map(|&v| i64::from(v)).sum()
    }
}

/// The result of evaluating one dice expression.
///
/// Owned by the caller that requested the roll; the engine keeps nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Final numeric result.
    pub total: i64,
    /// One group per dice term, in the order the terms appear.
    pub groups: Vec<RollGroup>,
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if group.negated {
                write!(f, "-")?;
            } else if i > 0 {
                write!(f, "+")?;
            }
            let values: Vec<String> = group.values.iter().map(u32::to_string).collect();
            write!(f, "[{}]", values.join(", "))?;
        }
        if self.groups.is_empty() {
            write!(f, "{}", self.total)
        } else {
            write!(f, " = {}", self.total)
        }
    }
}

/// Evaluate an expression, drawing dice from `rng`.
///
/// Pure apart from RNG consumption: the same tree always produces the
/// same group structure, only the drawn values differ.
pub fn eval<R: Rng + ?Sized>(expr: &DiceExpr, rng: &mut R) -> RollOutcome {
    let mut groups = Vec::new();
    let total = eval_node(expr, rng, &mut groups, false);
    RollOutcome { total, groups }
}

fn eval_node<R: Rng + ?Sized>(
    expr: &DiceExpr,
    rng: &mut R,
    groups: &mut Vec<RollGroup>,
    negated: bool,
) -> i64 {
    match expr {
        DiceExpr::Constant(v) => {
            if negated {
                -*v
            } else {
                *v
            }
        }
        DiceExpr::Dice(term) => roll_term(term, rng, groups, negated),
        DiceExpr::Binary { op, lhs, rhs } => {
            // Negation is folded into the children, so combining is
            // always addition: -(a - b) = (-a) + b.
            let negate_rhs = match op {
                BinOp::Add => negated,
                BinOp::Sub => !negated,
            };
            let left = eval_node(lhs, rng, groups, negated);
            let right = eval_node(rhs, rng, groups, negate_rhs);
            left + right
        }
    }
}

fn roll_term<R: Rng + ?Sized>(
    term: &DiceTerm,
    rng: &mut R,
    groups: &mut Vec<RollGroup>,
    negated: bool,
) -> i64 {
    let values: Vec<u32> = (0..term.count)
        .map(|_| rng.random_range(1..=term.faces))
        .collect();

    let kept = term.keep.map(|keep| {
        let mut sorted = values.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let mut subset = match keep {
            Keep::Highest(n) => sorted[..n as usize].to_vec(),
            Keep::Lowest(n) => sorted[sorted.len() - n as usize..].to_vec(),
        };
        subset.sort_unstable_by(|a, b| b.cmp(a));
        subset
    });

    let group = RollGroup {
        faces: term.faces,
        values,
        kept,
        negated,
    };
    let contribution = group.contribution();
    groups.push(group);
    if negated { -contribution } else { contribution }
}
