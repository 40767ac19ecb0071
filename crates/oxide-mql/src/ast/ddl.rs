//! Definition statements: databases, views, tables, knowledge bases, datasets and
//! model evaluation.

use super::expression::Identifier;
use super::params::ParamMap;
use super::query::Query;
use super::types::TableColumn;

/// `CREATE [OR REPLACE] DATABASE [IF NOT EXISTS] name [WITH] [ENGINE = '...'] [, PARAMETERS = {...}]`
///
/// `SCHEMA` and `PROJECT` are accepted in place of `DATABASE`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDatabase {
    pub name: Identifier,
    pub engine: Option<String>,
    pub parameters: Option<ParamMap>,
    pub is_replace: bool,
    pub if_not_exists: bool,
}

impl CreateDatabase {
    /// Creates a statement with no options.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Identifier::path(name),
            engine: None,
            parameters: None,
            is_replace: false,
            if_not_exists: false,
        }
    }
}

/// `ALTER DATABASE name key = value [, ...]`
///
/// Keys are option names and are stored lowercase.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterDatabase {
    pub name: Identifier,
    pub altered_params: ParamMap,
}

/// `UPDATE DATABASE name SET key = value [, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDatabase {
    pub name: Identifier,
    pub updated_params: ParamMap,
}

/// `DROP DATABASE [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq)]
pub struct DropDatabase {
    pub name: Identifier,
    pub if_exists: bool,
}

/// `CREATE [OR REPLACE] VIEW [IF NOT EXISTS] name [FROM integration] AS (query) [USING ...]`
///
/// The query text is kept verbatim; it may be written in the integration's own dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateView {
    pub name: Identifier,
    pub from_table: Option<Identifier>,
    pub query_str: String,
    pub if_not_exists: bool,
    pub is_replace: bool,
    pub using: Option<ParamMap>,
}

/// `ALTER VIEW name [FROM integration] AS (query) [USING ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct AlterView {
    pub name: Identifier,
    pub from_table: Option<Identifier>,
    pub query_str: String,
    pub using: Option<ParamMap>,
}

/// `DROP VIEW [IF EXISTS] a [, b ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct DropView {
    pub names: Vec<Identifier>,
    pub if_exists: bool,
}

/// Body of CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateTableSource {
    /// `(col type ..., PRIMARY KEY (...))`
    Columns(Vec<TableColumn>),
    /// `(SELECT ...)` or a bare `SELECT ...`
    Query(Query),
}

/// `CREATE [OR REPLACE] TABLE [IF NOT EXISTS] name ...`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub name: Identifier,
    pub is_replace: bool,
    pub if_not_exists: bool,
    pub source: CreateTableSource,
}

/// `DROP TABLE [IF EXISTS] a [, b ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct DropTables {
    pub tables: Vec<Identifier>,
    pub if_exists: bool,
}

/// `CREATE INDEX ON KNOWLEDGE_BASE name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateKnowledgeBaseIndex {
    pub name: Identifier,
}

/// `DROP DATASET [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDataset {
    pub name: Identifier,
    pub if_exists: bool,
}

/// `EVALUATE metric FROM (query) [USING ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluate {
    pub name: Identifier,
    /// Verbatim text of the data query.
    pub query_str: String,
    pub using: Option<ParamMap>,
}
