//! Parser for dice expressions.
//!
//! Grammar (left-to-right, `+`/`-` only):
//!
//! ```text
//! expr     := term (('+' | '-') term)*
//! term     := diceTerm | integer
//! diceTerm := [integer] 'd' integer ['k' integer | 'kl' integer]
//! ```
//!
//! An omitted leading count defaults to 1, so `d100` parses the same as
//! `1d100`. Safety bounds are enforced here, never silently clamped.

use super::lexer::{Spanned, Token, lex};
use super::{BinOp, DiceExpr, DiceTerm, Keep};
use crate::error::{MechError, MechResult};

/// Maximum dice in a single term.
pub const MAX_DICE_PER_TERM: u32 = 100;

/// Maximum faces on a single die.
pub const MAX_FACES: u32 = 1000;

/// Maximum dice across all terms of one expression.
pub const MAX_TOTAL_DICE: u32 = 200;

/// Parse an expression string into a [`DiceExpr`] tree.
///
/// Fails with [`MechError::Parse`] on malformed input and with
/// [`MechError::TooManyDice`] when a safety bound is exceeded.
pub fn parse(input: &str) -> MechResult<DiceExpr> {
    // ASCII lowercasing preserves byte offsets, so error positions still
    // point into the caller's original string.
    let lowered = input.to_ascii_lowercase();
    let tokens = lex(&lowered)?;
    if tokens.is_empty() {
        return Err(MechError::Parse {
            position: 0,
            reason: "empty expression".to_string(),
        });
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        end: lowered.len(),
    };
    let expr = parser.expression()?;
    parser.expect_end()?;

    let total = expr.total_dice();
    if total > MAX_TOTAL_DICE {
        return Err(MechError::TooManyDice {
            requested: total,
            limit: MAX_TOTAL_DICE,
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Byte position of the current token, or end of input.
    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.end)
    }

    fn error(&self, reason: impl Into<String>) -> MechError {
        MechError::Parse {
            position: self.position(),
            reason: reason.into(),
        }
    }

    fn expression(&mut self) -> MechResult<DiceExpr> {
        let mut expr = self.term()?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            expr = DiceExpr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            };
        }
        Ok(expr)
    }

    fn term(&mut self) -> MechResult<DiceExpr> {
        match self.peek() {
            Some(Token::Number(n)) => {
                self.advance();
                if self.peek() == Some(Token::Die) {
                    self.dice_term(n)
                } else {
                    Ok(DiceExpr::Constant(i64::from(n)))
                }
            }
            Some(Token::Die) => self.dice_term(1),
            Some(_) => Err(self.error("expected a dice term or number")),
            None => Err(self.error("dangling operator, expected a dice term or number")),
        }
    }

    /// Parse the `d faces [keep]` tail of a dice term with a known count.
    fn dice_term(&mut self, count: u32) -> MechResult<DiceExpr> {
        self.advance(); // consume 'd'

        let faces = match self.peek() {
            Some(Token::Number(n)) => {
                self.advance();
                n
            }
            _ => return Err(self.error("expected die faces after 'd'")),
        };

        if count == 0 {
            return Err(self.error("dice count must be at least 1"));
        }
        if count > MAX_DICE_PER_TERM {
            return Err(MechError::TooManyDice {
                requested: count,
                limit: MAX_DICE_PER_TERM,
            });
        }
        if faces == 0 {
            return Err(self.error("a die needs at least one face"));
        }
        if faces > MAX_FACES {
            return Err(self.error(format!("at most {MAX_FACES} faces per die")));
        }

        let keep = self.keep_suffix(count)?;
        Ok(DiceExpr::Dice(DiceTerm { count, faces, keep }))
    }

    fn keep_suffix(&mut self, count: u32) -> MechResult<Option<Keep>> {
        let highest = match self.peek() {
            Some(Token::KeepHighest) => true,
            Some(Token::KeepLowest) => false,
            _ => return Ok(None),
        };
        self.advance();
        let amount = match self.peek() {
            Some(Token::Number(n)) => {
                self.advance();
                n
            }
            _ => return Err(self.error("expected a number after the keep marker")),
        };
        if amount == 0 || amount > count {
            return Err(self.error(format!(
                "keep amount must be between 1 and the dice count ({count})"
            )));
        }
        Ok(Some(if highest {
            Keep::Highest(amount)
        } else {
            Keep::Lowest(amount)
        }))
    }

    fn expect_end(&mut self) -> MechResult<()> {
        if self.pos < self.tokens.len() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_count_defaults_to_one() {
        assert_eq!(parse("d100").unwrap(), parse("1d100").unwrap());
    }

    #[test]
    fn parse_is_structurally_deterministic() {
        assert_eq!(parse("3d6+5").unwrap(), parse("3d6+5").unwrap());
    }

    #[test]
    fn chained_terms_keep_their_own_shape() {
        let expr = parse("1d6+1d4").unwrap();
        let DiceExpr::Binary { op, lhs, rhs } = expr else {
            panic!("expected a binary node");
        };
        assert_eq!(op, BinOp::Add);
        assert_eq!(
            *lhs,
            DiceExpr::Dice(DiceTerm {
                count: 1,
                faces: 6,
                keep: None
            })
        );
        assert_eq!(
            *rhs,
            DiceExpr::Dice(DiceTerm {
                count: 1,
                faces: 4,
                keep: None
            })
        );
    }

    #[test]
    fn whitespace_and_case_are_insignificant() {
        assert_eq!(parse("2D6 + 3").unwrap(), parse("2d6+3").unwrap());
    }

    #[test]
    fn plain_integer_is_a_constant() {
        assert_eq!(parse("42").unwrap(), DiceExpr::Constant(42));
    }

    #[test]
    fn keep_highest_and_lowest() {
        assert_eq!(
            parse("4d6k3").unwrap(),
            DiceExpr::Dice(DiceTerm {
                count: 4,
                faces: 6,
                keep: Some(Keep::Highest(3))
            })
        );
        assert_eq!(
            parse("2d20kl1").unwrap(),
            DiceExpr::Dice(DiceTerm {
                count: 2,
                faces: 20,
                keep: Some(Keep::Lowest(1))
            })
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            parse("").unwrap_err(),
            MechError::Parse { position: 0, .. }
        ));
        assert!(matches!(parse("   ").unwrap_err(), MechError::Parse { .. }));
    }

    #[test]
    fn rejects_dangling_operators() {
        assert!(matches!(parse("1d6+").unwrap_err(), MechError::Parse { .. }));
        assert!(matches!(parse("+1d6").unwrap_err(), MechError::Parse { .. }));
    }

    #[test]
    fn rejects_incomplete_dice_terms() {
        assert!(matches!(parse("1d").unwrap_err(), MechError::Parse { .. }));
        assert!(matches!(parse("d").unwrap_err(), MechError::Parse { .. }));
    }

    #[test]
    fn rejects_zero_faces_and_zero_count() {
        assert!(matches!(parse("1d0").unwrap_err(), MechError::Parse { .. }));
        assert!(matches!(parse("0d6").unwrap_err(), MechError::Parse { .. }));
    }

    #[test]
    fn rejects_over_bound_dice_counts_distinctly() {
        assert!(matches!(
            parse("500d6").unwrap_err(),
            MechError::TooManyDice {
                requested: 500,
                limit: MAX_DICE_PER_TERM,
            }
        ));
        // Individually legal terms whose sum crosses the total bound.
        assert!(matches!(
            parse("100d6+100d6+100d6").unwrap_err(),
            MechError::TooManyDice {
                requested: 300,
                limit: MAX_TOTAL_DICE,
            }
        ));
    }

    #[test]
    fn rejects_too_many_faces() {
        assert!(matches!(parse("1d1001").unwrap_err(), MechError::Parse { .. }));
    }

    #[test]
    fn rejects_keep_beyond_count() {
        assert!(matches!(parse("2d6k3").unwrap_err(), MechError::Parse { .. }));
        assert!(matches!(parse("2d6k0").unwrap_err(), MechError::Parse { .. }));
    }

    #[test]
    fn error_position_points_at_the_offender() {
        let MechError::Parse { position, .. } = parse("1d6 % 2").unwrap_err() else {
            panic!("expected a parse error");
        };
        assert_eq!(position, 4);
    }
}
