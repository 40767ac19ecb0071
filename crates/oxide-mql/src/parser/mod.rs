//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Statement productions are split by family: queries, DDL and SET.

mod ddl;
mod error;
mod expression;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod query;
mod set;

pub use error::{ErrorKind, ParseError, Result};
pub use parser::{Parser, ParserOptions};
