//! Parser state, token helpers and statement dispatch.

use tracing::trace;

use super::error::{ParseError, Result};
use crate::ast::{
    AlterTable, Assignment, Delete, Expr, Identifier, Insert, InsertSource, Select, Show,
    Statement, TableRef, Update,
};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind, DEFAULT_MAX_DEPTH};

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting of expressions, subqueries and JSON literals.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parser for a single statement.
pub struct Parser<'a> {
    pub(super) lexer: Lexer<'a>,
    pub(super) current: Token,
    /// One token of lookahead.
    pub(super) peeked: Token,
    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    /// Creates a new parser with explicit limits.
    #[must_use]
    pub fn with_options(input: &'a str, options: ParserOptions) -> Self {
        let mut lexer = Lexer::with_max_depth(input, options.max_depth);
        let current = lexer.next_token();
        let peeked = lexer.next_token();
        Self {
            lexer,
            current,
            peeked,
            options,
            depth: 0,
        }
    }

    /// Parses a single statement, optionally followed by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not exactly one valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        let statement = self.parse_statement_body()?;
        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current.is_eof() {
            return Err(self.unexpected("end of statement"));
        }
        trace!(statement = statement.kind_name(), "parsed statement");
        Ok(statement)
    }

    fn parse_statement_body(&mut self) -> Result<Statement> {
        let Some(keyword) = self.current.as_keyword() else {
            if self.check(&TokenKind::LeftParen) {
                return Ok(Statement::Query(self.parse_query()?));
            }
            return Err(self.unexpected("statement"));
        };
        match keyword {
            Keyword::Select => Ok(Statement::Query(self.parse_query()?)),
            Keyword::Table => self.parse_table_shorthand(),
            Keyword::Insert => self.parse_insert().map(Statement::Insert),
            Keyword::Update if self.peek_keyword(Keyword::Database) => {
                self.parse_update_database().map(Statement::UpdateDatabase)
            }
            Keyword::Update => self.parse_update().map(Statement::Update),
            Keyword::Delete => self.parse_delete().map(Statement::Delete),
            Keyword::Set => {
                self.advance();
                self.parse_set().map(Statement::Set)
            }
            Keyword::Start => {
                self.advance();
                self.expect_keyword(Keyword::Transaction)?;
                Ok(Statement::StartTransaction)
            }
            Keyword::Begin => {
                self.advance();
                Ok(Statement::StartTransaction)
            }
            Keyword::Commit => {
                self.advance();
                Ok(Statement::Commit)
            }
            Keyword::Rollback => {
                self.advance();
                Ok(Statement::Rollback)
            }
            Keyword::Explain => {
                self.advance();
                self.parse_identifier_path().map(Statement::Explain)
            }
            Keyword::Show => self.parse_show().map(Statement::Show),
            Keyword::Create => self.parse_create(),
            Keyword::Alter => self.parse_alter(),
            Keyword::Drop => self.parse_drop(),
            Keyword::Evaluate => self.parse_evaluate().map(Statement::Evaluate),
            _ => Err(self.unexpected("statement")),
        }
    }

    /// Parses `TABLE name`, shorthand for `SELECT * FROM name`.
    fn parse_table_shorthand(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Table)?;
        let name = self.parse_identifier_path()?;
        let mut select = Select::new(vec![Expr::star()]).from(TableRef::Table { name, alias: None });
        self.parse_select_clauses(&mut select)?;
        Ok(Statement::Query(select.into()))
    }

    /// Parses an INSERT statement.
    fn parse_insert(&mut self) -> Result<Insert> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_identifier_path()?;

        let mut columns = Vec::new();
        if self.check(&TokenKind::LeftParen) && !self.peek_starts_query() {
            self.advance();
            columns = self.parse_identifier_list()?;
            self.expect(&TokenKind::RightParen)?;
        }

        let source = if self.check_keyword(Keyword::Values) {
            self.advance();
            let mut rows = Vec::new();
            loop {
                self.expect(&TokenKind::LeftParen)?;
                rows.push(self.parse_expression_list()?);
                self.expect(&TokenKind::RightParen)?;
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            InsertSource::Values(rows)
        } else if self.check_keyword(Keyword::Select) || self.check(&TokenKind::LeftParen) {
            InsertSource::Query(self.parse_query()?)
        } else {
            return Err(self.unexpected("VALUES or SELECT"));
        };

        Ok(Insert {
            table,
            columns,
            source,
        })
    }

    /// Parses an UPDATE statement.
    fn parse_update(&mut self) -> Result<Update> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_identifier_path()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = Vec::new();
        loop {
            let column = self.expect_identifier()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expression(0)?;
            assignments.push(Assignment { column, value });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        let where_clause = self.parse_optional_where()?;
        Ok(Update {
            table,
            assignments,
            where_clause,
        })
    }

    /// Parses a DELETE statement.
    fn parse_delete(&mut self) -> Result<Delete> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_identifier_path()?;
        let where_clause = self.parse_optional_where()?;
        Ok(Delete {
            table,
            where_clause,
        })
    }

    fn parse_optional_where(&mut self) -> Result<Option<Expr>> {
        if self.check_keyword(Keyword::Where) {
            self.advance();
            return Ok(Some(self.parse_expression(0)?));
        }
        Ok(None)
    }

    /// Parses `SHOW category [FROM a [FROM|IN b]] [LIKE '...'] [WHERE ...]`.
    fn parse_show(&mut self) -> Result<Show> {
        self.expect_keyword(Keyword::Show)?;

        let mut words = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Keyword(
                    Keyword::From | Keyword::In | Keyword::Like | Keyword::Where,
                ) => break,
                TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                    words.push(self.current_text().to_ascii_uppercase());
                    self.advance();
                }
                _ => break,
            }
        }
        if words.is_empty() {
            return Err(self.unexpected("SHOW category"));
        }

        let mut from_table = None;
        if self.check_keyword(Keyword::From) || self.check_keyword(Keyword::In) {
            self.advance();
            let mut name = self.parse_identifier_path()?;
            if self.check_keyword(Keyword::From) || self.check_keyword(Keyword::In) {
                self.advance();
                let mut database = self.parse_identifier_path()?;
                database.parts.append(&mut name.parts);
                name = database;
            }
            from_table = Some(name);
        }

        let mut like = None;
        if self.check_keyword(Keyword::Like) {
            self.advance();
            like = Some(self.expect_string()?);
        }

        let where_clause = self.parse_optional_where()?;
        Ok(Show {
            category: words.join(" "),
            from_table,
            like,
            where_clause,
        })
    }

    /// Parses `ALTER TABLE target <action>`; the action is kept verbatim.
    pub(super) fn parse_alter_table(&mut self) -> Result<AlterTable> {
        self.expect_keyword(Keyword::Table)?;
        let target = self.parse_identifier_path()?;
        if self.current.is_eof() || self.check(&TokenKind::Semicolon) {
            return Err(self.unexpected("ALTER TABLE action"));
        }
        let rest = self.lexer.take_rest(self.current.span.start);
        let arg = rest.slice(self.lexer.input()).to_string();
        self.refill();
        Ok(AlterTable { target, arg })
    }

    // --- Helper methods ---

    /// Advances to the next token.
    pub(super) fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peeked, next);
    }

    /// Reloads both lookahead tokens from the lexer's position.
    pub(super) fn refill(&mut self) {
        self.current = self.lexer.next_token();
        self.peeked = self.lexer.next_token();
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the token after the current one is the given keyword.
    pub(super) fn peek_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.peeked.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the token after the current one matches the given kind.
    pub(super) fn peek_is(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peeked.kind) == std::mem::discriminant(kind)
    }

    /// True when the current `(` opens a query rather than a list.
    pub(super) fn peek_starts_query(&self) -> bool {
        self.peek_keyword(Keyword::Select) || self.peek_is(&TokenKind::LeftParen)
    }

    /// Returns the source text of the current token.
    pub(super) fn current_text(&self) -> &'a str {
        self.current.span.slice(self.lexer.input())
    }

    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, &self.current, self.lexer.input())
    }

    pub(super) fn syntax_error(&self, message: impl Into<String>, span: Span) -> ParseError {
        ParseError::syntax(message, span, self.lexer.input())
    }

    pub(super) fn invalid_literal(&self, message: impl Into<String>, span: Span) -> ParseError {
        ParseError::invalid_literal(message, span, self.lexer.input())
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects and returns an identifier. Non-reserved keywords are accepted as
    /// written.
    pub(super) fn expect_identifier(&mut self) -> Result<String> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(kw) if !kw.is_reserved() => {
                let name = self.current_text().to_string();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Expects a single- or double-quoted string.
    pub(super) fn expect_string(&mut self) -> Result<String> {
        match &self.current.kind {
            TokenKind::String(value) | TokenKind::DoubleQuotedString(value) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("string")),
        }
    }

    /// Parses a dotted name. Parts after a dot may also be `*` (last part only) or
    /// an integer, as in `model_name.1`.
    pub(super) fn parse_identifier_path(&mut self) -> Result<Identifier> {
        let mut parts = vec![self.expect_identifier()?];
        while self.check(&TokenKind::Dot) {
            self.advance();
            match &self.current.kind {
                TokenKind::Star => {
                    parts.push("*".to_string());
                    self.advance();
                    break;
                }
                TokenKind::Integer(_) => {
                    parts.push(self.current_text().to_string());
                    self.advance();
                }
                _ => parts.push(self.expect_identifier()?),
            }
        }
        Ok(Identifier { parts })
    }

    /// Parses a comma-separated list of dotted names.
    pub(super) fn parse_identifier_path_list(&mut self) -> Result<Vec<Identifier>> {
        let mut names = vec![self.parse_identifier_path()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            names.push(self.parse_identifier_path()?);
        }
        Ok(names)
    }

    /// Parses a comma-separated list of plain identifiers.
    pub(super) fn parse_identifier_list(&mut self) -> Result<Vec<String>> {
        let mut names = vec![self.expect_identifier()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    /// Captures the text of the balanced group opened by the current `(` token
    /// without tokenizing it.
    pub(super) fn capture_group(&mut self) -> Result<String> {
        if !self.check(&TokenKind::LeftParen) {
            return Err(self.unexpected("'('"));
        }
        let open = self.current.span.start;
        let inner = self.lexer.scan_group(open)?;
        let text = verbatim(inner.slice(self.lexer.input()).trim());
        if text.is_empty() {
            return Err(self.syntax_error("Expected query text inside parentheses", inner));
        }
        self.refill();
        trace!(len = text.len(), "captured verbatim group");
        Ok(text)
    }

    /// Enters one level of nesting.
    pub(super) fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.syntax_error(
                format!("Nesting depth exceeds the limit of {}", self.options.max_depth),
                self.current.span,
            ));
        }
        Ok(())
    }

    pub(super) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Copies captured text, keeping a line break after a trailing line comment so
/// that the text can be followed by `)` when rendered.
pub(super) fn verbatim(text: &str) -> String {
    if Lexer::ends_in_line_comment(text) {
        format!("{text}\n")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, InsertSource, Query};
    use crate::parser::ErrorKind;

    fn parse(sql: &str) -> Result<Statement> {
        Parser::new(sql).parse_statement()
    }

    #[test]
    fn test_trailing_semicolon() {
        assert!(parse("SELECT 1;").is_ok());
        let err = parse("SELECT 1; SELECT 2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_insert_values() {
        let stmt = parse("INSERT INTO t (a, c) VALUES (1, 3), (4, 5)").unwrap();
        let Statement::Insert(insert) = stmt else {
            panic!("Expected INSERT");
        };
        assert_eq!(insert.columns, vec!["a", "c"]);
        assert!(matches!(insert.source, InsertSource::Values(ref rows) if rows.len() == 2));
    }

    #[test]
    fn test_insert_from_select() {
        let stmt = parse("INSERT INTO int1.t (SELECT * FROM x)").unwrap();
        let Statement::Insert(insert) = stmt else {
            panic!("Expected INSERT");
        };
        assert!(insert.columns.is_empty());
        assert!(matches!(insert.source, InsertSource::Query(Query::Select(_))));
    }

    #[test]
    fn test_update() {
        let stmt = parse("UPDATE t SET a = 1, b = 'x' WHERE id = 5").unwrap();
        let Statement::Update(update) = stmt else {
            panic!("Expected UPDATE");
        };
        assert_eq!(update.assignments.len(), 2);
        assert!(update.where_clause.is_some());
    }

    #[test]
    fn test_delete() {
        let stmt = parse("DELETE FROM t WHERE a > 1").unwrap();
        assert!(matches!(stmt, Statement::Delete(_)));
    }

    #[test]
    fn test_show_with_database() {
        let stmt = parse("SHOW FULL TABLES FROM t IN db LIKE 'p%'").unwrap();
        let Statement::Show(show) = stmt else {
            panic!("Expected SHOW");
        };
        assert_eq!(show.category, "FULL TABLES");
        assert_eq!(show.from_table.unwrap().parts, vec!["db", "t"]);
        assert_eq!(show.like.as_deref(), Some("p%"));
    }

    #[test]
    fn test_alter_table_keeps_action_verbatim() {
        let stmt = parse("alter table int1.t disable keys;").unwrap();
        let Statement::AlterTable(alter) = stmt else {
            panic!("Expected ALTER TABLE");
        };
        assert_eq!(alter.target.parts, vec!["int1", "t"]);
        assert_eq!(alter.arg, "disable keys");
    }

    #[test]
    fn test_explain() {
        let stmt = parse("EXPLAIN my_model").unwrap();
        assert!(matches!(stmt, Statement::Explain(ref id) if id.parts == ["my_model"]));
    }

    #[test]
    fn test_transactions() {
        assert_eq!(parse("START TRANSACTION").unwrap(), Statement::StartTransaction);
        assert_eq!(parse("begin").unwrap(), Statement::StartTransaction);
        assert_eq!(parse("COMMIT").unwrap(), Statement::Commit);
        assert_eq!(parse("ROLLBACK").unwrap(), Statement::Rollback);
    }

    #[test]
    fn test_depth_limit() {
        let sql = format!("SELECT {}1{}", "(".repeat(40), ")".repeat(40));
        let err = Parser::with_options(&sql, ParserOptions { max_depth: 16 })
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("Nesting depth"));
        assert!(Parser::new(&sql).parse_statement().is_ok());
    }

    #[test]
    fn test_table_shorthand() {
        let stmt = parse("TABLE my_table ORDER BY a LIMIT 3").unwrap();
        let select = stmt.as_query().and_then(Query::as_select).unwrap();
        assert!(matches!(select.targets[0].kind, ExprKind::Star));
        assert_eq!(select.order_by.len(), 1);
        assert!(select.limit.is_some());
    }
}
