//! Pratt expression parser tables for operator precedence.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the right operand of comparison-level operators.
pub const COMPARISON_RBP: u8 = 8;

/// Returns the prefix binding power for a token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        // Unary minus binds tighter than every infix operator
        TokenKind::Minus => Some(17),
        // NOT sits between AND and the comparisons
        TokenKind::Keyword(Keyword::Not) => Some(5),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// `NOT` is not listed: it only acts as an infix operator in `NOT IN`, `NOT LIKE`
/// and `NOT BETWEEN`, where the parser looks past it.
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        // Logical AND
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        // Comparison, pattern and vector distance operators
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Tilde
        | TokenKind::NotTilde
        | TokenKind::CosineDistance
        | TokenKind::L2Distance
        | TokenKind::L1Distance
        | TokenKind::InnerProduct
        | TokenKind::HammingDistance
        | TokenKind::JaccardDistance => Some((7, COMPARISON_RBP)),

        // IS, IN, BETWEEN, LIKE
        TokenKind::Keyword(Keyword::Is | Keyword::In | Keyword::Between | Keyword::Like) => {
            Some((7, COMPARISON_RBP))
        }

        // Additive (string concat has same precedence as addition)
        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((11, 12)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((13, 14)),

        // JSON path
        TokenKind::Arrow => Some((15, 16)),

        _ => None,
    }
}

/// Converts a token to a binary operator.
///
/// `IS`, `IN` and `BETWEEN` need extra tokens and are handled by the parser.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::Arrow => Some(BinaryOp::JsonGet),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Tilde => Some(BinaryOp::Match),
        TokenKind::NotTilde => Some(BinaryOp::NotMatch),
        TokenKind::CosineDistance => Some(BinaryOp::CosineDistance),
        TokenKind::L2Distance => Some(BinaryOp::L2Distance),
        TokenKind::L1Distance => Some(BinaryOp::L1Distance),
        TokenKind::InnerProduct => Some(BinaryOp::InnerProduct),
        TokenKind::HammingDistance => Some(BinaryOp::HammingDistance),
        TokenKind::JaccardDistance => Some(BinaryOp::JaccardDistance),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Keyword(Keyword::Like) => Some(BinaryOp::Like),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        _ => None,
    }
}
