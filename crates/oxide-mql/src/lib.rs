//! # oxide-mql
//!
//! A parser for a MySQL-flavoured SQL dialect extended with database, view and
//! knowledge-base DDL, native integration queries, model evaluation, vector and
//! JSON operators, bind parameters and session variables.
//!
//! This crate provides:
//! - A lazy lexer with JSON-literal decoding and verbatim group capture
//! - A hand-written recursive descent parser with Pratt expression parsing
//! - A typed AST that renders back to canonical SQL and dumps to a structural form
//!
//! ## Parsing and rendering
//!
//! ```rust
//! use oxide_mql::parse;
//!
//! let stmt = parse("select a from t where x = ? limit 5").unwrap();
//! assert_eq!(stmt.render(), "SELECT a FROM t WHERE x = ? LIMIT 5");
//!
//! // Rendered SQL parses back to the same tree.
//! let again = parse(&stmt.render()).unwrap();
//! assert_eq!(stmt.dump(), again.dump());
//! ```
//!
//! ## Verbatim text
//!
//! Native queries and view bodies are kept exactly as written:
//!
//! ```rust
//! use oxide_mql::{ast::TableRef, parse, Statement};
//!
//! let stmt = parse("SELECT * FROM pg (select @x from y)").unwrap();
//! let Statement::Query(query) = stmt else { unreachable!() };
//! let Some(TableRef::Native(native)) = &query.as_select().unwrap().from_table else {
//!     unreachable!()
//! };
//! assert_eq!(native.query, "select @x from y");
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Statement};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{ErrorKind, ParseError, Parser, ParserOptions};

/// Parses a single statement with default options.
///
/// # Errors
///
/// Returns a `ParseError` on the first lexical or grammar violation.
pub fn parse(sql: &str) -> parser::Result<Statement> {
    parse_with(sql, ParserOptions::default())
}

/// Parses a single statement with explicit options.
///
/// # Errors
///
/// Returns a `ParseError` on the first lexical or grammar violation, or when the
/// input nests deeper than `options.max_depth`.
pub fn parse_with(sql: &str, options: ParserOptions) -> parser::Result<Statement> {
    let _span = tracing::trace_span!("parse", len = sql.len()).entered();
    Parser::with_options(sql, options).parse_statement()
}
