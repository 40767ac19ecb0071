//! SQL rendering via `fmt::Display` for AST nodes.
//!
//! Keywords and operators are written uppercase; identifiers, strings and function
//! names keep their case. Re-parsing rendered text yields a tree with the same dump.

use std::fmt;

use super::ddl::{
    AlterDatabase, AlterView, CreateDatabase, CreateKnowledgeBaseIndex, CreateTable,
    CreateTableSource, CreateView, DropDatabase, DropDataset, DropTables, DropView, Evaluate,
    UpdateDatabase,
};
use super::expression::{precedence, Expr, ExprKind, Function, Identifier, Literal, Parameter, UnaryOp};
use super::params::{ParamMap, ParamValue};
use super::query::{Join, JoinType, NativeQuery, OrderBy, Query, Select, TableRef, Union};
use super::statement::{
    AlterTable, Assignment, Delete, Insert, InsertSource, Set, SetKind, Show, Statement, Update,
};
use super::types::{DataType, TableColumn};
use crate::lexer::Keyword;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn comma_list_fn<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    fmt_item: impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt_item(item, f)?;
    }
    Ok(())
}

/// Returns true if `name` is made of identifier characters and starts like one.
fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Returns true if the name must be backtick-quoted to re-lex as an identifier.
fn needs_quoting(name: &str) -> bool {
    if !is_plain_name(name) {
        return true;
    }
    Keyword::from_str(name).is_some_and(|kw| {
        kw.is_reserved() || matches!(kw, Keyword::Last | Keyword::Latest)
    })
}

pub(crate) fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if needs_quoting(name) {
        write!(f, "`{}`", name.replace('`', "``"))
    } else {
        f.write_str(name)
    }
}

fn write_function_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let callable = is_plain_name(name)
        && Keyword::from_str(name).is_none_or(|kw| kw.can_name_function());
    if callable {
        f.write_str(name)
    } else {
        write!(f, "`{}`", name.replace('`', "``"))
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "'{}'", value.replace('\'', "''"))
}

/// Formats a float so that it re-lexes as a float.
pub(crate) fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{text}.0")
    } else {
        text
    }
}

fn write_alias(f: &mut fmt::Formatter<'_>, alias: Option<&str>) -> fmt::Result {
    if let Some(alias) = alias {
        f.write_str(" AS ")?;
        write_name(f, alias)?;
    }
    Ok(())
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parenthesize: bool) -> fmt::Result {
    if parenthesize && !expr.parentheses {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

/// Writes a query that must appear inside parentheses.
fn write_subquery(f: &mut fmt::Formatter<'_>, query: &Query) -> fmt::Result {
    if query.parentheses() || query.alias().is_some() {
        write!(f, "{query}")
    } else {
        write!(f, "({query})")
    }
}

fn write_using(f: &mut fmt::Formatter<'_>, using: Option<&ParamMap>) -> fmt::Result {
    if let Some(map) = using {
        f.write_str(" USING ")?;
        write_assignments(f, map)?;
    }
    Ok(())
}

fn write_assignments(f: &mut fmt::Formatter<'_>, map: &ParamMap) -> fmt::Result {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_name(f, key)?;
        write!(f, " = {value}")?;
    }
    Ok(())
}

fn write_wrapped(
    f: &mut fmt::Formatter<'_>,
    parentheses: bool,
    alias: Option<&str>,
    body: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    let wrap = parentheses || alias.is_some();
    if wrap {
        f.write_str("(")?;
    }
    body(f)?;
    if wrap {
        f.write_str(")")?;
    }
    write_alias(f, alias)
}

const fn if_exists(flag: bool) -> &'static str {
    if flag {
        " IF EXISTS"
    } else {
        ""
    }
}

const fn if_not_exists(flag: bool) -> &'static str {
    if flag {
        " IF NOT EXISTS"
    } else {
        ""
    }
}

const fn or_replace(flag: bool) -> &'static str {
    if flag {
        " OR REPLACE"
    } else {
        ""
    }
}

// ---------------------------------------------------------------------------
// Parameter maps
// ---------------------------------------------------------------------------

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write_string(f, s),
            Self::Bareword(word) => f.write_str(word),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::List(items) => {
                f.write_str("[")?;
                comma_list(f, items)?;
                f.write_str("]")
            }
            Self::Map(map) => write!(f, "{map}"),
        }
    }
}

impl fmt::Display for ParamMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_string(f, key)?;
            write!(f, ": {value}")?;
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
                let bare = part == "*"
                    || (!part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
                if bare {
                    f.write_str(part)?;
                    continue;
                }
            }
            write_name(f, part)?;
        }
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::String(s) => write_string(f, s),
            Self::Bareword(word) => f.write_str(word),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write_name(f, namespace)?;
            f.write_str(".")?;
        }
        write_function_name(f, &self.name)?;
        f.write_str("(")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, &self.args)?;
        if let Some(from) = &self.from_arg {
            write!(f, " FROM {from}")?;
        }
        f.write_str(")")
    }
}

impl Expr {
    fn fmt_kind(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Identifier(ident) => write!(f, "{ident}"),
            ExprKind::Constant(literal) => write!(f, "{literal}"),
            ExprKind::Null => f.write_str("NULL"),
            ExprKind::Variable { name, is_system } => {
                let prefix = if *is_system { "@@" } else { "@" };
                write!(f, "{prefix}{name}")
            }
            ExprKind::Parameter(Parameter::Positional) => f.write_str("?"),
            ExprKind::Parameter(Parameter::Named(name)) => write!(f, ":{name}"),
            ExprKind::Star => f.write_str("*"),
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand,
            } => {
                f.write_str("-")?;
                let wrap = operand.precedence() < precedence::NEGATION
                    || operand.is_number()
                    || matches!(
                        operand.kind,
                        ExprKind::Unary {
                            op: UnaryOp::Neg,
                            ..
                        }
                    );
                write_operand(f, operand, wrap)
            }
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            } => {
                f.write_str("NOT ")?;
                write_operand(f, operand, operand.precedence() < precedence::NOT)
            }
            ExprKind::Binary { op, left, right } => {
                let prec = op.precedence();
                write_operand(f, left, left.precedence() < prec)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, right, right.precedence() <= prec)
            }
            ExprKind::Between {
                expr,
                low,
                high,
                negated,
            } => {
                write_operand(f, expr, expr.precedence() < precedence::COMPARISON)?;
                f.write_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " })?;
                write_operand(f, low, low.precedence() <= precedence::COMPARISON)?;
                f.write_str(" AND ")?;
                write_operand(f, high, high.precedence() <= precedence::COMPARISON)
            }
            ExprKind::Function(func) => write!(f, "{func}"),
            ExprKind::Tuple(items) => {
                f.write_str("(")?;
                comma_list(f, items)?;
                f.write_str(")")
            }
            ExprKind::Case {
                operand,
                when_clauses,
                else_result,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for clause in when_clauses {
                    write!(f, " WHEN {} THEN {}", clause.condition, clause.result)?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {else_result}")?;
                }
                f.write_str(" END")
            }
            ExprKind::TypeCast { arg, data_type } => write!(f, "CAST({arg} AS {data_type})"),
            ExprKind::Interval(value) => {
                f.write_str("INTERVAL ")?;
                write_string(f, value)
            }
            ExprKind::Subquery(query) => write_subquery(f, query),
            ExprKind::Exists(query) => {
                f.write_str("EXISTS ")?;
                write_subquery(f, query)
            }
            ExprKind::NotExists(query) => {
                f.write_str("NOT EXISTS ")?;
                write_subquery(f, query)
            }
            ExprKind::Last => f.write_str("LAST"),
            ExprKind::Latest => f.write_str("LATEST"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parentheses {
            f.write_str("(")?;
            self.fmt_kind(f)?;
            f.write_str(")")?;
        } else {
            self.fmt_kind(f)?;
        }
        write_alias(f, self.alias.as_deref())?;
        if self.with_rollup {
            f.write_str(" WITH ROLLUP")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if let Some(direction) = self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        if let Some(nulls) = self.nulls {
            write!(f, " {}", nulls.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Display for NativeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.integration, self.query)?;
        write_alias(f, self.alias.as_deref())
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parentheses {
            f.write_str("(")?;
        }
        write!(f, "{}", self.left)?;
        if self.join_type == JoinType::Implicit {
            f.write_str(", ")?;
        } else {
            write!(f, " {} ", self.join_type.as_str())?;
        }
        match &self.right {
            TableRef::Join(join) if !join.parentheses => write!(f, "({join})")?,
            right => write!(f, "{right}")?,
        }
        if let Some(condition) = &self.condition {
            write!(f, " ON {condition}")?;
        }
        if self.parentheses {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias } => {
                write!(f, "{name}")?;
                write_alias(f, alias.as_deref())
            }
            Self::Subquery(query) => write_subquery(f, query),
            Self::Join(join) => write!(f, "{join}"),
            Self::Native(native) => write!(f, "{native}"),
        }
    }
}

impl Select {
    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, &self.targets)?;
        if let Some(from) = &self.from_table {
            write!(f, " FROM {from}")?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            comma_list(f, &self.group_by)?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_list(f, &self.order_by)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        write_using(f, self.using.as_ref())
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_wrapped(f, self.parentheses, self.alias.as_deref(), |f| self.fmt_body(f))
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_wrapped(f, self.parentheses, self.alias.as_deref(), |f| {
            write!(f, "{}", self.left)?;
            f.write_str(if self.distinct { " UNION " } else { " UNION ALL " })?;
            match &self.right {
                Query::Union(_) => write_subquery(f, &self.right),
                Query::Select(select) => write!(f, "{select}"),
            }
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => write!(f, "{select}"),
            Self::Union(union) => write!(f, "{union}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if !self.columns.is_empty() {
            f.write_str("(")?;
            comma_list_fn(f, &self.columns, |c, f| write_name(f, c))?;
            f.write_str(")")?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES ")?;
                comma_list_fn(f, rows, |row, f| {
                    f.write_str("(")?;
                    comma_list(f, row)?;
                    f.write_str(")")
                })
            }
            InsertSource::Query(query) => write!(f, " {query}"),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, &self.column)?;
        write!(f, " = {}", self.value)
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {} SET ", self.table)?;
        comma_list(f, &self.assignments)?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Delete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scope) = self.scope {
            write!(f, "{} ", scope.as_str())?;
        }
        match &self.kind {
            SetKind::List(items) => comma_list(f, items),
            SetKind::Assign { name, value } => write!(f, "{name} = {value}"),
            SetKind::Names { value, collate } => {
                write!(f, "NAMES {value}")?;
                if let Some(collate) = collate {
                    write!(f, " COLLATE {collate}")?;
                }
                Ok(())
            }
            SetKind::Charset(value) => write!(f, "CHARSET {value}"),
            SetKind::Transaction {
                isolation_level,
                access_mode,
            } => {
                f.write_str("TRANSACTION")?;
                if let Some(level) = isolation_level {
                    write!(f, " ISOLATION LEVEL {}", level.as_str())?;
                    if access_mode.is_some() {
                        f.write_str(",")?;
                    }
                }
                if let Some(mode) = access_mode {
                    write!(f, " {}", mode.as_str())?;
                }
                Ok(())
            }
            SetKind::Category { category, value } => write!(f, "{category} {value}"),
        }
    }
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHOW {}", self.category)?;
        if let Some(from) = &self.from_table {
            write!(f, " FROM {from}")?;
        }
        if let Some(like) = &self.like {
            f.write_str(" LIKE ")?;
            write_string(f, like)?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AlterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} {}", self.target, self.arg)
    }
}

impl fmt::Display for CreateDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE{} DATABASE{} {}",
            or_replace(self.is_replace),
            if_not_exists(self.if_not_exists),
            self.name
        )?;
        let mut separator = " WITH ";
        if let Some(engine) = &self.engine {
            write!(f, "{separator}ENGINE = ")?;
            write_string(f, engine)?;
            separator = ", ";
        }
        if let Some(parameters) = &self.parameters {
            write!(f, "{separator}PARAMETERS = {parameters}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AlterDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER DATABASE {} ", self.name)?;
        write_assignments(f, &self.altered_params)
    }
}

impl fmt::Display for UpdateDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE DATABASE {} SET ", self.name)?;
        write_assignments(f, &self.updated_params)
    }
}

impl fmt::Display for DropDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP DATABASE{} {}", if_exists(self.if_exists), self.name)
    }
}

fn write_view_body(
    f: &mut fmt::Formatter<'_>,
    from_table: Option<&Identifier>,
    query_str: &str,
    using: Option<&ParamMap>,
) -> fmt::Result {
    if let Some(from) = from_table {
        write!(f, " FROM {from}")?;
    }
    write!(f, " AS ({query_str})")?;
    write_using(f, using)
}

impl fmt::Display for CreateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE{} VIEW{} {}",
            or_replace(self.is_replace),
            if_not_exists(self.if_not_exists),
            self.name
        )?;
        write_view_body(
            f,
            self.from_table.as_ref(),
            &self.query_str,
            self.using.as_ref(),
        )
    }
}

impl fmt::Display for AlterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER VIEW {}", self.name)?;
        write_view_body(
            f,
            self.from_table.as_ref(),
            &self.query_str,
            self.using.as_ref(),
        )
    }
}

impl fmt::Display for DropView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP VIEW{} ", if_exists(self.if_exists))?;
        comma_list(f, &self.names)
    }
}

impl fmt::Display for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, &self.name)?;
        write!(f, " {}", self.data_type)?;
        match self.nullable {
            Some(false) => f.write_str(" NOT NULL")?,
            Some(true) => f.write_str(" NULL")?,
            None => {}
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        if self.is_primary_key {
            f.write_str(" PRIMARY KEY")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE{} TABLE{} {} (",
            or_replace(self.is_replace),
            if_not_exists(self.if_not_exists),
            self.name
        )?;
        match &self.source {
            CreateTableSource::Columns(columns) => comma_list(f, columns)?,
            CreateTableSource::Query(query) => write!(f, "{query}")?,
        }
        f.write_str(")")
    }
}

impl fmt::Display for DropTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP TABLE{} ", if_exists(self.if_exists))?;
        comma_list(f, &self.tables)
    }
}

impl fmt::Display for CreateKnowledgeBaseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE INDEX ON KNOWLEDGE_BASE {}", self.name)
    }
}

impl fmt::Display for DropDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP DATASET{} {}", if_exists(self.if_exists), self.name)
    }
}

impl fmt::Display for Evaluate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EVALUATE {} FROM ({})", self.name, self.query_str)?;
        write_using(f, self.using.as_ref())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(query) => write!(f, "{query}"),
            Self::Insert(insert) => write!(f, "{insert}"),
            Self::Update(update) => write!(f, "{update}"),
            Self::Delete(delete) => write!(f, "{delete}"),
            Self::Set(set) => write!(f, "SET {set}"),
            Self::StartTransaction => f.write_str("START TRANSACTION"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),
            Self::Explain(target) => write!(f, "EXPLAIN {target}"),
            Self::Show(show) => write!(f, "{show}"),
            Self::AlterTable(alter) => write!(f, "{alter}"),
            Self::CreateDatabase(create) => write!(f, "{create}"),
            Self::AlterDatabase(alter) => write!(f, "{alter}"),
            Self::UpdateDatabase(update) => write!(f, "{update}"),
            Self::DropDatabase(drop) => write!(f, "{drop}"),
            Self::CreateView(create) => write!(f, "{create}"),
            Self::AlterView(alter) => write!(f, "{alter}"),
            Self::DropView(drop) => write!(f, "{drop}"),
            Self::CreateTable(create) => write!(f, "{create}"),
            Self::DropTables(drop) => write!(f, "{drop}"),
            Self::CreateKnowledgeBaseIndex(create) => write!(f, "{create}"),
            Self::DropDataset(drop) => write!(f, "{drop}"),
            Self::Evaluate(evaluate) => write!(f, "{evaluate}"),
        }
    }
}
