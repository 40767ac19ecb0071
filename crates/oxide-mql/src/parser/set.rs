//! SET statement parsing.

use super::error::Result;
use super::parser::Parser;
use crate::ast::{AccessMode, Expr, ExprKind, IsolationLevel, Set, SetKind, SetScope};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses the body of a SET statement; `SET` has been consumed. Several
    /// comma-separated items produce a list.
    pub(super) fn parse_set(&mut self) -> Result<Set> {
        let first = self.parse_set_item()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.check(&TokenKind::Comma) {
            self.advance();
            items.push(self.parse_set_item()?);
        }
        Ok(Set::list(items))
    }

    fn parse_set_item(&mut self) -> Result<Set> {
        let scope = match self.current.as_keyword() {
            Some(Keyword::Global) if !self.peek_is(&TokenKind::Eq) => Some(SetScope::Global),
            Some(Keyword::Session) if !self.peek_is(&TokenKind::Eq) => Some(SetScope::Session),
            _ => None,
        };
        if scope.is_some() {
            self.advance();
        }

        let category_form = !self.peek_is(&TokenKind::Eq);
        let kind = match self.current.as_keyword() {
            Some(Keyword::Names) if category_form => {
                self.advance();
                let value = self.parse_set_value()?;
                let collate = if self.check_keyword(Keyword::Collate) {
                    self.advance();
                    Some(self.parse_set_value()?)
                } else {
                    None
                };
                SetKind::Names { value, collate }
            }
            Some(Keyword::Charset) if category_form => {
                self.advance();
                SetKind::Charset(self.parse_set_value()?)
            }
            Some(Keyword::Character) if self.peek_keyword(Keyword::Set) => {
                self.advance();
                self.advance();
                SetKind::Charset(self.parse_set_value()?)
            }
            Some(Keyword::Transaction) if category_form => {
                self.advance();
                self.parse_transaction_characteristics()?
            }
            _ => self.parse_set_assignment()?,
        };

        Ok(Set { scope, kind })
    }

    /// Parses `name = value`, or `category value` when no `=` follows a single word.
    fn parse_set_assignment(&mut self) -> Result<SetKind> {
        let name = match &self.current.kind {
            TokenKind::Variable(name) => {
                let name = Expr::variable(name.clone(), false);
                self.advance();
                name
            }
            TokenKind::SystemVariable(name) => {
                let name = Expr::variable(name.clone(), true);
                self.advance();
                name
            }
            TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                Expr::new(ExprKind::Identifier(self.parse_identifier_path()?))
            }
            _ => return Err(self.unexpected("variable name")),
        };

        if self.check(&TokenKind::Eq) {
            self.advance();
            let value = self.parse_set_value()?;
            return Ok(SetKind::Assign { name, value });
        }

        match name.kind {
            ExprKind::Identifier(ident) if ident.parts.len() == 1 && !self.at_item_end() => {
                let category = ident.name().to_ascii_uppercase();
                let value = self.parse_set_value()?;
                Ok(SetKind::Category { category, value })
            }
            _ => Err(self.unexpected("'='")),
        }
    }

    /// Parses the value side of a SET item. `ON`, `OFF`, `TRUE`, `FALSE` and
    /// `DEFAULT` standing alone are kept as unquoted words.
    fn parse_set_value(&mut self) -> Result<Expr> {
        let is_bareword = match &self.current.kind {
            TokenKind::Keyword(Keyword::On | Keyword::True | Keyword::False | Keyword::Default) => {
                true
            }
            TokenKind::Identifier(word) => word.eq_ignore_ascii_case("off"),
            _ => false,
        };
        if is_bareword
            && matches!(
                self.peeked.kind,
                TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof
            )
        {
            let word = self.current_text().to_string();
            self.advance();
            return Ok(Expr::bareword(word));
        }
        self.parse_expression(0)
    }

    fn at_item_end(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof
        )
    }

    /// Parses `ISOLATION LEVEL <level>` and `READ WRITE | READ ONLY` in either
    /// order; at least one is required.
    fn parse_transaction_characteristics(&mut self) -> Result<SetKind> {
        let mut isolation_level = None;
        let mut access_mode = None;

        loop {
            if self.check_keyword(Keyword::Isolation) {
                if isolation_level.is_some() {
                    return Err(self.syntax_error(
                        "Isolation level given twice",
                        self.current.span,
                    ));
                }
                self.advance();
                self.expect_keyword(Keyword::Level)?;
                isolation_level = Some(self.parse_isolation_level()?);
            } else if self.check_keyword(Keyword::Read) {
                if access_mode.is_some() {
                    return Err(self.syntax_error("Access mode given twice", self.current.span));
                }
                self.advance();
                access_mode = Some(if self.check_keyword(Keyword::Write) {
                    AccessMode::ReadWrite
                } else if self.check_keyword(Keyword::Only) {
                    AccessMode::ReadOnly
                } else {
                    return Err(self.unexpected("WRITE or ONLY"));
                });
                self.advance();
            } else {
                break;
            }

            if self.check(&TokenKind::Comma)
                && (self.peek_keyword(Keyword::Isolation) || self.peek_keyword(Keyword::Read))
            {
                self.advance();
            }
        }

        if isolation_level.is_none() && access_mode.is_none() {
            return Err(self.unexpected("ISOLATION LEVEL or READ"));
        }
        Ok(SetKind::Transaction {
            isolation_level,
            access_mode,
        })
    }

    fn parse_isolation_level(&mut self) -> Result<IsolationLevel> {
        let level = match self.current.as_keyword() {
            Some(Keyword::Repeatable) => {
                self.advance();
                self.expect_keyword(Keyword::Read)?;
                return Ok(IsolationLevel::RepeatableRead);
            }
            Some(Keyword::Read) => {
                self.advance();
                match self.current.as_keyword() {
                    Some(Keyword::Committed) => IsolationLevel::ReadCommitted,
                    Some(Keyword::Uncommitted) => IsolationLevel::ReadUncommitted,
                    _ => return Err(self.unexpected("COMMITTED or UNCOMMITTED")),
                }
            }
            Some(Keyword::Serializable) => IsolationLevel::Serializable,
            _ => return Err(self.unexpected("isolation level")),
        };
        self.advance();
        Ok(level)
    }
}
