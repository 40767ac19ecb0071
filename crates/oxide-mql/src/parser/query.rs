//! SELECT, UNION and FROM-clause parsing.

use tracing::trace;

use super::error::Result;
use super::parser::Parser;
use crate::ast::{JoinType, NativeQuery, ParamMap, ParamValue, Query, Select, TableRef, Union};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a query: a SELECT or parenthesized query, followed by any number of
    /// UNION arms.
    pub(super) fn parse_query(&mut self) -> Result<Query> {
        self.descend()?;
        let query = self.parse_union_chain();
        self.ascend();
        query
    }

    fn parse_union_chain(&mut self) -> Result<Query> {
        let mut left = self.parse_query_term()?;
        while self.check_keyword(Keyword::Union) {
            self.advance();
            let distinct = if self.check_keyword(Keyword::All) {
                self.advance();
                false
            } else {
                if self.check_keyword(Keyword::Distinct) {
                    self.advance();
                }
                true
            };
            let right = self.parse_query_term()?;
            left = Query::Union(Box::new(Union {
                left,
                right,
                distinct,
                parentheses: false,
                alias: None,
            }));
        }
        Ok(left)
    }

    /// Parses a single SELECT or a parenthesized query.
    pub(super) fn parse_query_term(&mut self) -> Result<Query> {
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let mut query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            query.set_parentheses(true);
            return Ok(query);
        }
        self.parse_select().map(Query::from)
    }

    fn parse_select(&mut self) -> Result<Select> {
        self.expect_keyword(Keyword::Select)?;

        let mut select = Select::default();
        if self.check_keyword(Keyword::Distinct) {
            self.advance();
            select.distinct = true;
        } else if self.check_keyword(Keyword::All) {
            self.advance();
        }

        loop {
            let mut target = self.parse_expression(0)?;
            if let Some(alias) = self.parse_optional_alias()? {
                target.alias = Some(alias);
            }
            select.targets.push(target);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        self.parse_select_clauses(&mut select)?;
        Ok(select)
    }

    /// Parses the clauses following the target list. Each clause may appear once,
    /// in any order.
    pub(super) fn parse_select_clauses(&mut self, select: &mut Select) -> Result<()> {
        loop {
            let Some(keyword) = self.current.as_keyword() else {
                break;
            };
            match keyword {
                Keyword::From => {
                    self.reject_duplicate(select.from_table.is_some(), "FROM")?;
                    self.advance();
                    select.from_table = Some(self.parse_from_clause()?);
                }
                Keyword::Where => {
                    self.reject_duplicate(select.where_clause.is_some(), "WHERE")?;
                    self.advance();
                    select.where_clause = Some(self.parse_expression(0)?);
                }
                Keyword::Group => {
                    self.reject_duplicate(!select.group_by.is_empty(), "GROUP BY")?;
                    self.advance();
                    self.expect_keyword(Keyword::By)?;
                    select.group_by = self.parse_group_by_list()?;
                }
                Keyword::Having => {
                    self.reject_duplicate(select.having.is_some(), "HAVING")?;
                    self.advance();
                    select.having = Some(self.parse_expression(0)?);
                }
                Keyword::Order => {
                    self.reject_duplicate(!select.order_by.is_empty(), "ORDER BY")?;
                    self.advance();
                    self.expect_keyword(Keyword::By)?;
                    select.order_by = self.parse_order_by_list()?;
                }
                Keyword::Limit => {
                    self.reject_duplicate(select.limit.is_some(), "LIMIT")?;
                    self.advance();
                    let first = self.parse_expression(0)?;
                    if self.check(&TokenKind::Comma) {
                        // LIMIT offset, count
                        self.reject_duplicate(select.offset.is_some(), "OFFSET")?;
                        self.advance();
                        select.offset = Some(first);
                        select.limit = Some(self.parse_expression(0)?);
                    } else {
                        select.limit = Some(first);
                    }
                }
                Keyword::Offset => {
                    self.reject_duplicate(select.offset.is_some(), "OFFSET")?;
                    self.advance();
                    select.offset = Some(self.parse_expression(0)?);
                }
                Keyword::Using => {
                    self.reject_duplicate(select.using.is_some(), "USING")?;
                    self.advance();
                    select.using = Some(self.parse_param_list()?);
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn reject_duplicate(&self, present: bool, clause: &str) -> Result<()> {
        if present {
            return Err(self.syntax_error(
                format!("Duplicate {clause} clause"),
                self.current.span,
            ));
        }
        Ok(())
    }

    /// Parses `[AS] alias`. Without AS only an identifier or a double-quoted
    /// string is taken as an alias.
    pub(super) fn parse_optional_alias(&mut self) -> Result<Option<String>> {
        if self.check_keyword(Keyword::As) {
            self.advance();
            return match &self.current.kind {
                TokenKind::String(alias) | TokenKind::DoubleQuotedString(alias) => {
                    let alias = alias.clone();
                    self.advance();
                    Ok(Some(alias))
                }
                _ => self.expect_identifier().map(Some),
            };
        }
        match &self.current.kind {
            TokenKind::Identifier(alias) | TokenKind::DoubleQuotedString(alias) => {
                let alias = alias.clone();
                self.advance();
                Ok(Some(alias))
            }
            _ => Ok(None),
        }
    }

    // --- FROM clause ---

    fn parse_from_clause(&mut self) -> Result<TableRef> {
        let mut source = self.parse_table_primary()?;
        loop {
            let join_type = if self.check(&TokenKind::Comma) {
                self.advance();
                JoinType::Implicit
            } else if let Some(join_type) = self.parse_join_type()? {
                join_type
            } else {
                break;
            };
            let right = self.parse_table_primary()?;
            let condition = if join_type != JoinType::Implicit && self.check_keyword(Keyword::On)
            {
                self.advance();
                Some(self.parse_expression(0)?)
            } else {
                None
            };
            source = source.join(join_type, right, condition);
        }
        Ok(source)
    }

    /// Parses the join keywords, if present.
    fn parse_join_type(&mut self) -> Result<Option<JoinType>> {
        let join_type = match self.current.as_keyword() {
            Some(Keyword::Join) => {
                self.advance();
                return Ok(Some(JoinType::Join));
            }
            Some(Keyword::Inner) => JoinType::Inner,
            Some(Keyword::Cross) => JoinType::Cross,
            Some(Keyword::Left) => JoinType::Left,
            Some(Keyword::Right) => JoinType::Right,
            Some(Keyword::Full | Keyword::Outer) => JoinType::Full,
            _ => return Ok(None),
        };
        let outer_allowed = matches!(join_type, JoinType::Left | JoinType::Right)
            || self.check_keyword(Keyword::Full);
        self.advance();
        if outer_allowed && self.check_keyword(Keyword::Outer) {
            self.advance();
        }
        self.expect_keyword(Keyword::Join)?;
        Ok(Some(join_type))
    }

    /// Parses a single FROM source: a table, a subquery, a parenthesized join or
    /// a native query.
    fn parse_table_primary(&mut self) -> Result<TableRef> {
        if self.check(&TokenKind::LeftParen) {
            if self.peek_starts_query() {
                let mut query = self.parse_query_term()?;
                if let Some(alias) = self.parse_optional_alias()? {
                    query.set_alias(Some(alias));
                }
                return Ok(TableRef::Subquery(query));
            }

            self.advance();
            self.descend()?;
            let inner = self.parse_from_clause();
            self.ascend();
            let inner = inner?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(match inner {
                TableRef::Join(mut join) => {
                    join.parentheses = true;
                    TableRef::Join(join)
                }
                other => other,
            });
        }

        let name = self.parse_identifier_path()?;
        if self.check(&TokenKind::LeftParen) {
            let query = self.capture_group()?;
            trace!(integration = %name, "native query");
            let alias = self.parse_optional_alias()?;
            return Ok(TableRef::Native(NativeQuery {
                integration: name,
                query,
                alias,
            }));
        }
        let alias = self.parse_optional_alias()?;
        Ok(TableRef::Table { name, alias })
    }

    // --- Parameter lists ---

    /// Parses `key = value [, key = value ...]`. Keys keep their case.
    pub(super) fn parse_param_list(&mut self) -> Result<ParamMap> {
        let mut params = ParamMap::new();
        loop {
            let key = self.parse_param_key()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_param_value()?;
            params.insert(key, value);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(params)
    }

    /// Parses a parameter name: an identifier, a keyword or a quoted string.
    pub(super) fn parse_param_key(&mut self) -> Result<String> {
        let key = match &self.current.kind {
            TokenKind::Identifier(name)
            | TokenKind::String(name)
            | TokenKind::DoubleQuotedString(name) => name.clone(),
            TokenKind::Keyword(_) => self.current_text().to_string(),
            _ => return Err(self.unexpected("parameter name")),
        };
        self.advance();
        Ok(key)
    }

    /// Parses a parameter value: a string, a signed number, a JSON object or an
    /// unquoted word kept as written.
    pub(super) fn parse_param_value(&mut self) -> Result<ParamValue> {
        if self.check(&TokenKind::Minus) {
            let value = match self.peeked.kind {
                TokenKind::Integer(value) => ParamValue::Integer(-value),
                TokenKind::Float(value) => ParamValue::Float(-value),
                _ => {
                    self.advance();
                    return Err(self.unexpected("number"));
                }
            };
            self.advance();
            self.advance();
            return Ok(value);
        }

        let value = match &self.current.kind {
            TokenKind::String(value) | TokenKind::DoubleQuotedString(value) => {
                ParamValue::String(value.clone())
            }
            TokenKind::Integer(value) => ParamValue::Integer(*value),
            TokenKind::Float(value) => ParamValue::Float(*value),
            TokenKind::Json(map) => ParamValue::Map(map.clone()),
            TokenKind::Identifier(_)
            | TokenKind::Keyword(_)
            | TokenKind::Variable(_)
            | TokenKind::SystemVariable(_) => return self.parse_bareword().map(ParamValue::Bareword),
            _ => return Err(self.unexpected("parameter value")),
        };
        self.advance();
        Ok(value)
    }

    /// Parses an unquoted, possibly dotted word and returns its source text.
    pub(super) fn parse_bareword(&mut self) -> Result<String> {
        let start = self.current.span;
        let mut end = start;
        self.advance();
        while self.check(&TokenKind::Dot) {
            self.advance();
            match &self.current.kind {
                TokenKind::Identifier(_)
                | TokenKind::Keyword(_)
                | TokenKind::Integer(_)
                | TokenKind::Star => {
                    end = self.current.span;
                    self.advance();
                }
                _ => return Err(self.unexpected("name")),
            }
        }
        Ok(start.merge(end).slice(self.lexer.input()).to_string())
    }
}
