//! Statement AST types.

use super::ddl::{
    AlterDatabase, AlterView, CreateDatabase, CreateKnowledgeBaseIndex, CreateTable, CreateView,
    DropDatabase, DropDataset, DropTables, DropView, Evaluate, UpdateDatabase,
};
use super::expression::{Expr, Identifier};
use super::query::Query;

/// The source of rows for INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// `VALUES (...), (...)`
    Values(Vec<Vec<Expr>>),
    /// `INSERT INTO t SELECT ...`
    Query(Query),
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// The target table.
    pub table: Identifier,
    /// Column list; empty when omitted.
    pub columns: Vec<String>,
    /// Rows to insert.
    pub source: InsertSource,
}

/// A `column = value` pair in UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Expr,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: Identifier,
    pub assignments: Vec<Assignment>,
    pub where_clause: Option<Expr>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: Identifier,
    pub where_clause: Option<Expr>,
}

/// Scope modifier of a SET item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetScope {
    Global,
    Session,
}

impl SetScope {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::Session => "SESSION",
        }
    }
}

/// `SET TRANSACTION ISOLATION LEVEL ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    RepeatableRead,
    ReadCommitted,
    ReadUncommitted,
    Serializable,
}

impl IsolationLevel {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RepeatableRead => "REPEATABLE READ",
            Self::ReadCommitted => "READ COMMITTED",
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

/// `SET TRANSACTION READ ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadWrite,
    ReadOnly,
}

impl AccessMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadWrite => "READ WRITE",
            Self::ReadOnly => "READ ONLY",
        }
    }
}

/// What a SET item does.
#[derive(Debug, Clone, PartialEq)]
pub enum SetKind {
    /// Several comma-separated items.
    List(Vec<Set>),
    /// `name = value`; `name` is an identifier or a variable.
    Assign { name: Expr, value: Expr },
    /// `NAMES value [COLLATE collation]`
    Names { value: Expr, collate: Option<Expr> },
    /// `CHARSET value` or `CHARACTER SET value`
    Charset(Expr),
    /// `TRANSACTION` characteristics.
    Transaction {
        isolation_level: Option<IsolationLevel>,
        access_mode: Option<AccessMode>,
    },
    /// `category value`, e.g. `SET active model_name.1`.
    Category { category: String, value: Expr },
}

/// A SET statement or one item of a SET list.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub scope: Option<SetScope>,
    pub kind: SetKind,
}

impl Set {
    /// Creates an unscoped item.
    #[must_use]
    pub const fn new(kind: SetKind) -> Self {
        Self { scope: None, kind }
    }

    /// Creates `name = value`.
    #[must_use]
    pub const fn assign(name: Expr, value: Expr) -> Self {
        Self::new(SetKind::Assign { name, value })
    }

    /// Creates a comma-separated list.
    #[must_use]
    pub const fn list(items: Vec<Self>) -> Self {
        Self::new(SetKind::List(items))
    }

    /// Sets the scope.
    #[must_use]
    pub const fn scoped(mut self, scope: SetScope) -> Self {
        self.scope = Some(scope);
        self
    }
}

/// `SHOW category [FROM ...] [LIKE '...'] [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    /// Uppercase category words, e.g. `FULL TABLES`.
    pub category: String,
    pub from_table: Option<Identifier>,
    pub like: Option<String>,
    pub where_clause: Option<Expr>,
}

/// `ALTER TABLE target <verbatim action>`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    pub target: Identifier,
    /// Everything after the table name, trimmed.
    pub arg: String,
}

/// A parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT or UNION.
    Query(Query),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Set(Set),
    /// `START TRANSACTION` or `BEGIN`.
    StartTransaction,
    Commit,
    Rollback,
    /// `EXPLAIN target`
    Explain(Identifier),
    Show(Show),
    AlterTable(AlterTable),
    CreateDatabase(CreateDatabase),
    AlterDatabase(AlterDatabase),
    UpdateDatabase(UpdateDatabase),
    DropDatabase(DropDatabase),
    CreateView(CreateView),
    AlterView(AlterView),
    DropView(DropView),
    CreateTable(CreateTable),
    DropTables(DropTables),
    CreateKnowledgeBaseIndex(CreateKnowledgeBaseIndex),
    DropDataset(DropDataset),
    Evaluate(Evaluate),
}

impl Statement {
    /// Returns the node name used in dumps and diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Query(Query::Select(_)) => "Select",
            Self::Query(Query::Union(_)) => "Union",
            Self::Insert(_) => "Insert",
            Self::Update(_) => "Update",
            Self::Delete(_) => "Delete",
            Self::Set(_) => "Set",
            Self::StartTransaction => "StartTransaction",
            Self::Commit => "CommitTransaction",
            Self::Rollback => "RollbackTransaction",
            Self::Explain(_) => "Explain",
            Self::Show(_) => "Show",
            Self::AlterTable(_) => "AlterTable",
            Self::CreateDatabase(_) => "CreateDatabase",
            Self::AlterDatabase(_) => "AlterDatabase",
            Self::UpdateDatabase(_) => "UpdateDatabase",
            Self::DropDatabase(_) => "DropDatabase",
            Self::CreateView(_) => "CreateView",
            Self::AlterView(_) => "AlterView",
            Self::DropView(_) => "DropView",
            Self::CreateTable(_) => "CreateTable",
            Self::DropTables(_) => "DropTables",
            Self::CreateKnowledgeBaseIndex(_) => "CreateKnowledgeBaseIndex",
            Self::DropDataset(_) => "DropDataset",
            Self::Evaluate(_) => "Evaluate",
        }
    }

    /// Returns the query if this statement is one.
    #[must_use]
    pub const fn as_query(&self) -> Option<&Query> {
        match self {
            Self::Query(query) => Some(query),
            _ => None,
        }
    }

    /// Renders the statement as canonical SQL text.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl From<Query> for Statement {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::query::Select;

    #[test]
    fn test_kind_name() {
        let select = Statement::from(Query::from(Select::new(vec![Expr::integer(1)])));
        assert_eq!(select.kind_name(), "Select");
        assert_eq!(Statement::Commit.kind_name(), "CommitTransaction");
    }

    #[test]
    fn test_set_builders() {
        let set = Set::assign(Expr::identifier("autocommit"), Expr::integer(1))
            .scoped(SetScope::Global);
        assert_eq!(set.scope, Some(SetScope::Global));
        assert!(matches!(set.kind, SetKind::Assign { .. }));
    }

    #[test]
    fn test_isolation_level_as_str() {
        assert_eq!(IsolationLevel::RepeatableRead.as_str(), "REPEATABLE READ");
        assert_eq!(AccessMode::ReadOnly.as_str(), "READ ONLY");
    }
}
