//! Lexer for the SQL dialect.

mod span;
mod token;
mod tokenizer;

pub use span::{Position, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
pub(crate) use tokenizer::DEFAULT_MAX_DEPTH;

/// Tokenizes `input` lazily.
///
/// The iterator yields every token up to and including [`TokenKind::Eof`], or stops
/// at the first lexical error.
#[must_use]
pub const fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}
