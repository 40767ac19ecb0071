//! Parser error types.

use crate::lexer::{Position, Span, Token, TokenKind};

/// Which stage rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unterminated literal, comment, JSON object or group; illegal character.
    Lexical,
    /// The token stream matches no grammar production.
    Syntax,
    /// A well-formed token carries an unusable payload, e.g. `PARAMETERS = 'wow'`.
    InvalidLiteral,
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {position}")]
pub struct ParseError {
    /// The stage that failed.
    pub kind: ErrorKind,
    /// The error message.
    pub message: String,
    /// The byte range of the offending input.
    pub span: Span,
    /// Line and column of `span.start`.
    pub position: Position,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The offending token (if applicable).
    pub found: Option<String>,
}

/// Result alias used throughout the parser.
pub type Result<T> = std::result::Result<T, ParseError>;

impl ParseError {
    fn build(kind: ErrorKind, message: impl Into<String>, span: Span, input: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            position: Position::locate(input, span.start),
            expected: None,
            found: None,
        }
    }

    /// Creates a lexical error.
    #[must_use]
    pub fn lexical(message: impl Into<String>, span: Span, input: &str) -> Self {
        Self::build(ErrorKind::Lexical, message, span, input)
    }

    /// Creates a syntax error without an expected set.
    #[must_use]
    pub fn syntax(message: impl Into<String>, span: Span, input: &str) -> Self {
        Self::build(ErrorKind::Syntax, message, span, input)
    }

    /// Creates an invalid-literal error.
    #[must_use]
    pub fn invalid_literal(message: impl Into<String>, span: Span, input: &str) -> Self {
        Self::build(ErrorKind::InvalidLiteral, message, span, input)
    }

    /// Creates an "unexpected token" error.
    ///
    /// An error token from the lexer is reported as the lexical error it carries.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token, input: &str) -> Self {
        let expected: String = expected.into();
        let message = match &found.kind {
            TokenKind::Error(message) => return Self::lexical(message.clone(), found.span, input),
            TokenKind::Eof => format!("Unexpected end of input: expected {expected}"),
            kind => format!("Unexpected token: expected {expected}, found {kind}"),
        };
        let mut error = Self::syntax(message, found.span, input);
        error.expected = Some(expected);
        error.found = Some(found.kind.to_string());
        error
    }
}
