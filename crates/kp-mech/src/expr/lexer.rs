//! Tokenizer for dice expressions.
//!
//! The token set is tiny: numbers, the `d` die marker, the `k`/`kl` keep
//! markers, and the two operators. Whitespace is insignificant. Input is
//! ASCII-lowercased by the parser before lexing, so the lexer only needs
//! the lowercase spellings.

use logos::Logos;

use crate::error::{MechError, MechResult};

/// A lexed token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(super) enum Token {
    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// Keep-lowest marker (`kl`). Listed before `k` so it wins the match.
    #[token("kl")]
    KeepLowest,

    /// Keep-highest marker (`k`).
    #[token("k")]
    KeepHighest,

    /// Die marker (`d`).
    #[token("d")]
    Die,

    /// An unsigned integer literal.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    Number(u32),
}

/// A token with its byte range in the source.
pub(super) type Spanned = (Token, std::ops::Range<usize>);

/// Lex an expression into spanned tokens, failing on the first character
/// or over-long number that does not fit the grammar.
pub(super) fn lex(source: &str) -> MechResult<Vec<Spanned>> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(MechError::Parse {
                    position: span.start,
                    reason: format!("unexpected input {:?}", &source[span.clone()]),
                });
            }
        }
    }
    Ok(tokens)
}
