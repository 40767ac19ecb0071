//! CREATE, ALTER, DROP, UPDATE DATABASE and EVALUATE parsing.

use tracing::trace;

use super::error::Result;
use super::parser::{verbatim, Parser};
use crate::ast::{
    AlterDatabase, AlterView, CreateDatabase, CreateKnowledgeBaseIndex, CreateTable,
    CreateTableSource, CreateView, DropDatabase, DropDataset, DropTables, DropView, Evaluate,
    Identifier, ParamMap, Statement, TableColumn, UpdateDatabase,
};
use crate::lexer::{Keyword, Span, TokenKind};

/// Body of a CREATE VIEW or ALTER VIEW statement.
struct ViewBody {
    from_table: Option<Identifier>,
    query_str: String,
    using: Option<ParamMap>,
}

impl Parser<'_> {
    /// Parses a CREATE statement.
    pub(super) fn parse_create(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Create)?;
        let is_replace = if self.check_keyword(Keyword::Or) {
            self.advance();
            self.expect_keyword(Keyword::Replace)?;
            true
        } else {
            false
        };

        match self.current.as_keyword() {
            Some(Keyword::Database | Keyword::Schema | Keyword::Project) => {
                self.advance();
                self.parse_create_database(is_replace)
                    .map(Statement::CreateDatabase)
            }
            Some(Keyword::View) => {
                self.advance();
                self.parse_create_view(is_replace).map(Statement::CreateView)
            }
            Some(Keyword::Table) => {
                self.advance();
                self.parse_create_table(is_replace)
                    .map(Statement::CreateTable)
            }
            Some(Keyword::Index) if !is_replace => {
                self.advance();
                self.expect_keyword(Keyword::On)?;
                self.expect_keyword(Keyword::KnowledgeBase)?;
                let name = self.parse_identifier_path()?;
                Ok(Statement::CreateKnowledgeBaseIndex(
                    CreateKnowledgeBaseIndex { name },
                ))
            }
            _ => Err(self.unexpected("DATABASE, VIEW, TABLE or INDEX")),
        }
    }

    /// Parses an ALTER statement.
    pub(super) fn parse_alter(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Alter)?;
        match self.current.as_keyword() {
            Some(Keyword::Table) => self.parse_alter_table().map(Statement::AlterTable),
            Some(Keyword::Database | Keyword::Schema | Keyword::Project) => {
                self.advance();
                let name = self.parse_identifier_path()?;
                let mut altered_params = ParamMap::new();
                loop {
                    let key = self.parse_param_key()?.to_ascii_lowercase();
                    self.expect(&TokenKind::Eq)?;
                    let value = self.parse_param_value()?;
                    altered_params.insert(key, value);
                    if !self.check(&TokenKind::Comma) {
                        break;
                    }
                    self.advance();
                }
                Ok(Statement::AlterDatabase(AlterDatabase {
                    name,
                    altered_params,
                }))
            }
            Some(Keyword::View) => {
                self.advance();
                let name = self.parse_identifier_path()?;
                let body = self.parse_view_body()?;
                Ok(Statement::AlterView(AlterView {
                    name,
                    from_table: body.from_table,
                    query_str: body.query_str,
                    using: body.using,
                }))
            }
            _ => Err(self.unexpected("TABLE, DATABASE or VIEW")),
        }
    }

    /// Parses a DROP statement.
    pub(super) fn parse_drop(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Drop)?;
        match self.current.as_keyword() {
            Some(Keyword::Database | Keyword::Schema | Keyword::Project) => {
                self.advance();
                let if_exists = self.parse_if_exists()?;
                let name = self.parse_identifier_path()?;
                Ok(Statement::DropDatabase(DropDatabase { name, if_exists }))
            }
            Some(Keyword::View) => {
                self.advance();
                let if_exists = self.parse_if_exists()?;
                let names = self.parse_identifier_path_list()?;
                Ok(Statement::DropView(DropView { names, if_exists }))
            }
            Some(Keyword::Table) => {
                self.advance();
                let if_exists = self.parse_if_exists()?;
                let tables = self.parse_identifier_path_list()?;
                Ok(Statement::DropTables(DropTables { tables, if_exists }))
            }
            Some(Keyword::Dataset) => {
                self.advance();
                let if_exists = self.parse_if_exists()?;
                let name = self.parse_identifier_path()?;
                Ok(Statement::DropDataset(DropDataset { name, if_exists }))
            }
            _ => Err(self.unexpected("DATABASE, VIEW, TABLE or DATASET")),
        }
    }

    /// Parses `UPDATE DATABASE name SET key = value [, ...]`.
    pub(super) fn parse_update_database(&mut self) -> Result<UpdateDatabase> {
        self.expect_keyword(Keyword::Update)?;
        self.expect_keyword(Keyword::Database)?;
        let name = self.parse_identifier_path()?;
        self.expect_keyword(Keyword::Set)?;
        let updated_params = self.parse_param_list()?;
        Ok(UpdateDatabase {
            name,
            updated_params,
        })
    }

    /// Parses `EVALUATE metric FROM (query) [USING ...]`.
    pub(super) fn parse_evaluate(&mut self) -> Result<Evaluate> {
        self.expect_keyword(Keyword::Evaluate)?;
        let name = self.parse_identifier_path()?;
        self.expect_keyword(Keyword::From)?;
        let query_str = self.capture_group()?;
        let using = self.parse_optional_using()?;
        Ok(Evaluate {
            name,
            query_str,
            using,
        })
    }

    // --- CREATE helpers ---

    fn parse_create_database(&mut self, is_replace: bool) -> Result<CreateDatabase> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier_path()?;

        if self.check_keyword(Keyword::With) || self.check_keyword(Keyword::Using) {
            self.advance();
        }

        let mut engine = None;
        if self.check_keyword(Keyword::Engine) {
            self.advance();
            if self.check(&TokenKind::Eq) {
                self.advance();
            }
            engine = Some(match &self.current.kind {
                TokenKind::String(value) | TokenKind::DoubleQuotedString(value) => {
                    let value = value.clone();
                    self.advance();
                    value
                }
                _ => self.expect_identifier()?,
            });
            if self.check(&TokenKind::Comma) {
                self.advance();
            }
        }

        let mut parameters = None;
        if self.check_keyword(Keyword::Parameters) {
            self.advance();
            if self.check(&TokenKind::Eq) {
                self.advance();
            }
            parameters = Some(match &self.current.kind {
                TokenKind::Json(map) => {
                    let map = map.clone();
                    self.advance();
                    map
                }
                TokenKind::Error(_) | TokenKind::Eof => return Err(self.unexpected("JSON object")),
                _ => {
                    return Err(self.invalid_literal(
                        "PARAMETERS must be a JSON object",
                        self.current.span,
                    ))
                }
            });
        }

        Ok(CreateDatabase {
            name,
            engine,
            parameters,
            is_replace,
            if_not_exists,
        })
    }

    fn parse_create_view(&mut self, is_replace: bool) -> Result<CreateView> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier_path()?;
        let body = self.parse_view_body()?;
        Ok(CreateView {
            name,
            from_table: body.from_table,
            query_str: body.query_str,
            if_not_exists,
            is_replace,
            using: body.using,
        })
    }

    /// Parses `[FROM integration] [AS] (query) [USING ...]`. Without parentheses
    /// the rest of the statement is the query.
    fn parse_view_body(&mut self) -> Result<ViewBody> {
        let from_table = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_identifier_path()?)
        } else {
            None
        };
        if self.check_keyword(Keyword::As) {
            self.advance();
        }

        if self.check(&TokenKind::LeftParen) {
            let query_str = self.capture_group()?;
            let using = self.parse_optional_using()?;
            return Ok(ViewBody {
                from_table,
                query_str,
                using,
            });
        }

        if self.current.is_eof() || self.check(&TokenKind::Semicolon) {
            return Err(self.unexpected("view query"));
        }
        let rest = self.lexer.take_rest(self.current.span.start);
        let query_str = verbatim(rest.slice(self.lexer.input()));
        trace!(len = query_str.len(), "captured view query");
        self.refill();
        Ok(ViewBody {
            from_table,
            query_str,
            using: None,
        })
    }

    fn parse_create_table(&mut self, is_replace: bool) -> Result<CreateTable> {
        let mut if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_identifier_path()?;
        if !if_not_exists {
            if_not_exists = self.parse_if_not_exists()?;
        }

        let source = if self.check(&TokenKind::LeftParen) && self.peek_starts_query() {
            self.advance();
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            CreateTableSource::Query(query)
        } else if self.check(&TokenKind::LeftParen) {
            CreateTableSource::Columns(self.parse_column_definitions()?)
        } else if self.check_keyword(Keyword::Select) {
            CreateTableSource::Query(self.parse_query()?)
        } else {
            return Err(self.unexpected("column list or query"));
        };

        Ok(CreateTable {
            name,
            is_replace,
            if_not_exists,
            source,
        })
    }

    /// Parses `(column, ..., [PRIMARY KEY (names)])`.
    fn parse_column_definitions(&mut self) -> Result<Vec<TableColumn>> {
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = Vec::new();
        let mut primary_keys: Vec<(String, Span)> = Vec::new();

        loop {
            if self.check_keyword(Keyword::Primary) {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.expect(&TokenKind::LeftParen)?;
                loop {
                    let span = self.current.span;
                    primary_keys.push((self.expect_identifier()?, span));
                    if !self.check(&TokenKind::Comma) {
                        break;
                    }
                    self.advance();
                }
                self.expect(&TokenKind::RightParen)?;
            } else {
                columns.push(self.parse_column_definition()?);
            }
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen)?;

        // Column names compare case-insensitively here, as in MySQL.
        for (key, span) in primary_keys {
            let Some(column) = columns
                .iter_mut()
                .find(|column| column.name.eq_ignore_ascii_case(&key))
            else {
                return Err(self.invalid_literal(
                    format!("PRIMARY KEY names unknown column '{key}'"),
                    span,
                ));
            };
            column.is_primary_key = true;
        }

        Ok(columns)
    }

    fn parse_column_definition(&mut self) -> Result<TableColumn> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut column = TableColumn::new(name, data_type);

        loop {
            match self.current.as_keyword() {
                Some(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    column.nullable = Some(false);
                }
                Some(Keyword::Null) => {
                    self.advance();
                    column.nullable = Some(true);
                }
                Some(Keyword::Default) => {
                    self.advance();
                    column.default = Some(self.parse_expression(0)?);
                }
                Some(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    column.is_primary_key = true;
                }
                _ => break,
            }
        }

        Ok(column)
    }

    // --- Shared helpers ---

    fn parse_optional_using(&mut self) -> Result<Option<ParamMap>> {
        if self.check_keyword(Keyword::Using) {
            self.advance();
            return self.parse_param_list().map(Some);
        }
        Ok(None)
    }

    /// Parses an optional `IF EXISTS`.
    fn parse_if_exists(&mut self) -> Result<bool> {
        if self.check_keyword(Keyword::If) {
            self.advance();
            self.expect_keyword(Keyword::Exists)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Parses an optional `IF NOT EXISTS`.
    fn parse_if_not_exists(&mut self) -> Result<bool> {
        if self.check_keyword(Keyword::If) {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{CreateTableSource, ParamValue, Statement};
    use crate::parser::{ErrorKind, Parser, Result};

    fn parse(sql: &str) -> Result<Statement> {
        Parser::new(sql).parse_statement()
    }

    #[test]
    fn test_create_database_with_engine_and_parameters() {
        let stmt = parse(
            "CREATE DATABASE IF NOT EXISTS db WITH ENGINE = 'postgres', PARAMETERS = {\"host\": \"h\", \"port\": 5432}",
        )
        .unwrap();
        let Statement::CreateDatabase(create) = stmt else {
            panic!("Expected CREATE DATABASE");
        };
        assert!(create.if_not_exists);
        assert_eq!(create.engine.as_deref(), Some("postgres"));
        let params = create.parameters.unwrap();
        assert_eq!(params.get("port"), Some(&ParamValue::Integer(5432)));
    }

    #[test]
    fn test_parameters_must_be_json() {
        let err = parse("CREATE DATABASE db WITH ENGINE = 'x', PARAMETERS = 'wow'").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLiteral);

        let err = parse("CREATE DATABASE db PARAMETERS = {\"a\": }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
    }

    #[test]
    fn test_schema_and_project_are_databases() {
        for sql in ["DROP DATABASE db", "DROP SCHEMA db", "DROP PROJECT db"] {
            assert!(matches!(
                parse(sql).unwrap(),
                Statement::DropDatabase(ref drop) if !drop.if_exists
            ));
        }
    }

    #[test]
    fn test_alter_database_lowercases_keys() {
        let Statement::AlterDatabase(alter) = parse("ALTER DATABASE db Default_Llm = 'gpt'").unwrap()
        else {
            panic!("Expected ALTER DATABASE");
        };
        assert!(alter.altered_params.contains_key("default_llm"));
    }

    #[test]
    fn test_create_view_captures_text() {
        let Statement::CreateView(view) =
            parse("CREATE VIEW v FROM int1 AS (SELECT @x, @@y FROM t WHERE z = @w)").unwrap()
        else {
            panic!("Expected CREATE VIEW");
        };
        assert_eq!(view.query_str, "SELECT @x, @@y FROM t WHERE z = @w");
        assert_eq!(view.from_table.unwrap().parts, vec!["int1"]);
    }

    #[test]
    fn test_create_view_without_parentheses() {
        let Statement::CreateView(view) = parse("create view v as select * from t;").unwrap() else {
            panic!("Expected CREATE VIEW");
        };
        assert_eq!(view.query_str, "select * from t");
    }

    #[test]
    fn test_create_table_from_query() {
        let Statement::CreateTable(table) = parse("CREATE OR REPLACE TABLE t (SELECT * FROM x)").unwrap()
        else {
            panic!("Expected CREATE TABLE");
        };
        assert!(table.is_replace);
        assert!(matches!(table.source, CreateTableSource::Query(_)));
    }

    #[test]
    fn test_create_table_columns_with_primary_key() {
        let Statement::CreateTable(table) = parse(
            "CREATE TABLE t IF NOT EXISTS (id INT NOT NULL, name VARCHAR(20) DEFAULT 'x', PRIMARY KEY (id))",
        )
        .unwrap() else {
            panic!("Expected CREATE TABLE");
        };
        assert!(table.if_not_exists);
        let CreateTableSource::Columns(columns) = table.source else {
            panic!("Expected columns");
        };
        assert!(columns[0].is_primary_key);
        assert_eq!(columns[0].nullable, Some(false));
        assert_eq!(columns[1].data_type.args, vec![20]);
        assert!(!columns[1].is_primary_key);
    }

    #[test]
    fn test_primary_key_unknown_column() {
        let err = parse("CREATE TABLE t (id INT, PRIMARY KEY (nope))").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLiteral);
    }

    #[test]
    fn test_drop_lists() {
        let Statement::DropView(drop) = parse("DROP VIEW IF EXISTS a, b.c").unwrap() else {
            panic!("Expected DROP VIEW");
        };
        assert!(drop.if_exists);
        assert_eq!(drop.names.len(), 2);
        assert!(matches!(
            parse("DROP TABLE t1, t2").unwrap(),
            Statement::DropTables(ref drop) if drop.tables.len() == 2
        ));
        assert!(matches!(
            parse("DROP DATASET IF EXISTS ds").unwrap(),
            Statement::DropDataset(ref drop) if drop.if_exists
        ));
    }

    #[test]
    fn test_knowledge_base_index() {
        assert!(matches!(
            parse("CREATE INDEX ON KNOWLEDGE_BASE my_kb").unwrap(),
            Statement::CreateKnowledgeBaseIndex(_)
        ));
    }

    #[test]
    fn test_evaluate() {
        let Statement::Evaluate(evaluate) = parse(
            "EVALUATE balanced_accuracy_score FROM (SELECT t.a, p.b FROM x) USING evaluate_label_col = 'a'",
        )
        .unwrap() else {
            panic!("Expected EVALUATE");
        };
        assert_eq!(evaluate.query_str, "SELECT t.a, p.b FROM x");
        assert!(evaluate.using.unwrap().contains_key("evaluate_label_col"));
    }

    #[test]
    fn test_update_database_keeps_key_case() {
        let Statement::UpdateDatabase(update) =
            parse("UPDATE DATABASE db SET Token = 'abc', port = 1").unwrap()
        else {
            panic!("Expected UPDATE DATABASE");
        };
        assert_eq!(update.updated_params.keys().collect::<Vec<_>>(), vec!["Token", "port"]);
    }
}
