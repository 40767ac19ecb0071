//! Abstract Syntax Tree (AST) types for the dialect.
//!
//! Every node renders back to SQL through `Display` and exposes a structural
//! `dump()` used to compare trees.

mod ddl;
mod display;
mod dump;
mod expression;
mod params;
mod query;
mod statement;
mod types;

pub use ddl::{
    AlterDatabase, AlterView, CreateDatabase, CreateKnowledgeBaseIndex, CreateTable,
    CreateTableSource, CreateView, DropDatabase, DropDataset, DropTables, DropView, Evaluate,
    UpdateDatabase,
};
pub use expression::{
    BinaryOp, Expr, ExprKind, Function, Identifier, Literal, Parameter, UnaryOp, WhenClause,
};
pub use params::{ParamMap, ParamValue};
pub use query::{
    Join, JoinType, NativeQuery, NullOrdering, OrderBy, OrderDirection, Query, Select, TableRef,
    Union,
};
pub use statement::{
    AccessMode, AlterTable, Assignment, Delete, Insert, InsertSource, IsolationLevel, Set,
    SetKind, SetScope, Show, Statement, Update,
};
pub use types::{DataType, TableColumn};
