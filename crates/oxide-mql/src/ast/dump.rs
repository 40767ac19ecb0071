//! Structural dump of AST nodes.
//!
//! A dump lists every semantic field of a node in a fixed order, one node per
//! bracketed block. Optional fields appear only when set and boolean flags only
//! when true. Keywords and operators are lowercase. Whether an expression was
//! written inside parentheses is not part of the dump.

use super::ddl::{
    AlterDatabase, AlterView, CreateDatabase, CreateKnowledgeBaseIndex, CreateTable,
    CreateTableSource, CreateView, DropDatabase, DropDataset, DropTables, DropView, Evaluate,
    UpdateDatabase,
};
use super::display::format_float;
use super::expression::{Expr, ExprKind, Function, Identifier, Literal, Parameter};
use super::params::ParamMap;
use super::query::{Join, NativeQuery, OrderBy, Query, Select, TableRef, Union};
use super::statement::{
    AlterTable, Assignment, Delete, Insert, InsertSource, Set, SetKind, Show, Statement, Update,
};
use super::types::TableColumn;

const INDENT: &str = "  ";

enum Field {
    Text(String),
    Node(Node),
    List(Vec<Node>),
}

/// One node of a dump under construction.
pub(crate) struct Node {
    name: &'static str,
    fields: Vec<(&'static str, Field)>,
}

impl Node {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    fn text(mut self, key: &'static str, value: impl ToString) -> Self {
        self.fields.push((key, Field::Text(value.to_string())));
        self
    }

    fn opt_text(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.text(key, value),
            None => self,
        }
    }

    /// Quoted string field.
    fn string(self, key: &'static str, value: &str) -> Self {
        self.text(key, format!("{value:?}"))
    }

    fn opt_string(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.string(key, value),
            None => self,
        }
    }

    fn flag(self, key: &'static str, value: bool) -> Self {
        if value {
            self.text(key, "true")
        } else {
            self
        }
    }

    fn child(mut self, key: &'static str, node: Node) -> Self {
        self.fields.push((key, Field::Node(node)));
        self
    }

    fn opt_child(self, key: &'static str, node: Option<Node>) -> Self {
        match node {
            Some(node) => self.child(key, node),
            None => self,
        }
    }

    fn list(mut self, key: &'static str, nodes: Vec<Node>) -> Self {
        self.fields.push((key, Field::List(nodes)));
        self
    }

    fn nonempty_list(self, key: &'static str, nodes: Vec<Node>) -> Self {
        if nodes.is_empty() {
            self
        } else {
            self.list(key, nodes)
        }
    }

    fn params(self, key: &'static str, map: Option<&ParamMap>) -> Self {
        self.opt_text(key, map)
    }

    fn is_flat(&self) -> bool {
        self.fields
            .iter()
            .all(|(_, field)| matches!(field, Field::Text(_)))
    }

    fn write(&self, out: &mut String, depth: usize) {
        out.push_str(self.name);
        out.push('(');
        if self.is_flat() {
            for (i, (key, field)) in self.fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Field::Text(text) = field {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(text);
                }
            }
            out.push(')');
            return;
        }
        out.push('\n');
        for (key, field) in &self.fields {
            indent(out, depth + 1);
            out.push_str(key);
            out.push('=');
            match field {
                Field::Text(text) => out.push_str(text),
                Field::Node(node) => node.write(out, depth + 1),
                Field::List(nodes) if nodes.is_empty() => out.push_str("[]"),
                Field::List(nodes) => {
                    out.push_str("[\n");
                    for node in nodes {
                        indent(out, depth + 2);
                        node.write(out, depth + 2);
                        out.push_str(",\n");
                    }
                    indent(out, depth + 1);
                    out.push(']');
                }
            }
            out.push_str(",\n");
        }
        indent(out, depth);
        out.push(')');
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Types that can be dumped.
pub(crate) trait Dump {
    fn node(&self) -> Node;

    fn dump_at(&self, depth: usize) -> String {
        let mut out = String::new();
        indent(&mut out, depth);
        self.node().write(&mut out, depth);
        out
    }
}

fn nodes<T: Dump>(items: &[T]) -> Vec<Node> {
    items.iter().map(Dump::node).collect()
}

fn lower(keyword: &str) -> String {
    keyword.to_ascii_lowercase()
}

fn parts(ident: &Identifier) -> String {
    format!("{:?}", ident.parts)
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl Dump for Identifier {
    fn node(&self) -> Node {
        Node::new("Identifier").text("parts", parts(self))
    }
}

impl Dump for Function {
    fn node(&self) -> Node {
        Node::new("Function")
            .string("name", &self.name)
            .opt_string("namespace", self.namespace.as_deref())
            .flag("distinct", self.distinct)
            .list("args", nodes(&self.args))
            .opt_child("from_arg", self.from_arg.as_deref().map(Dump::node))
    }
}

fn literal_node(literal: &Literal) -> Node {
    let node = Node::new("Constant");
    match literal {
        Literal::Integer(i) => node.text("value", i),
        Literal::Float(v) => node.text("value", format_float(*v)),
        Literal::String(s) => node.string("value", s),
        Literal::Bareword(word) => node.string("value", word).text("with_quotes", "false"),
        Literal::Boolean(b) => node.text("value", b),
    }
}

fn query_child(query: &Query) -> Node {
    query.node()
}

impl Dump for Expr {
    fn node(&self) -> Node {
        let node = match &self.kind {
            ExprKind::Identifier(ident) => ident.node(),
            ExprKind::Constant(literal) => literal_node(literal),
            ExprKind::Null => Node::new("NullConstant"),
            ExprKind::Variable { name, is_system } => Node::new("Variable")
                .string("name", name)
                .flag("is_system_var", *is_system),
            ExprKind::Parameter(Parameter::Positional) => {
                Node::new("Parameter").string("value", "?")
            }
            ExprKind::Parameter(Parameter::Named(name)) => {
                Node::new("Parameter").string("value", &format!(":{name}"))
            }
            ExprKind::Star => Node::new("Star"),
            ExprKind::Unary { op, operand } => Node::new("UnaryOperation")
                .text("op", lower(op.as_str()))
                .list("args", vec![operand.node()]),
            ExprKind::Binary { op, left, right } => Node::new("BinaryOperation")
                .text("op", lower(op.as_str()))
                .list("args", vec![left.node(), right.node()]),
            ExprKind::Between {
                expr,
                low,
                high,
                negated,
            } => Node::new("BetweenOperation")
                .flag("negated", *negated)
                .list("args", vec![expr.node(), low.node(), high.node()]),
            ExprKind::Function(func) => func.node(),
            ExprKind::Tuple(items) => Node::new("Tuple").list("items", nodes(items)),
            ExprKind::Case {
                operand,
                when_clauses,
                else_result,
            } => Node::new("Case")
                .opt_child("operand", operand.as_deref().map(Dump::node))
                .list(
                    "whens",
                    when_clauses
                        .iter()
                        .map(|clause| {
                            Node::new("When")
                                .child("condition", clause.condition.node())
                                .child("result", clause.result.node())
                        })
                        .collect(),
                )
                .opt_child("default", else_result.as_deref().map(Dump::node)),
            ExprKind::TypeCast { arg, data_type } => Node::new("TypeCast")
                .string("type_name", &lower(&data_type.name))
                .opt_text(
                    "precision",
                    (!data_type.args.is_empty()).then(|| format!("{:?}", data_type.args)),
                )
                .child("arg", arg.node()),
            ExprKind::Interval(value) => Node::new("Interval").string("value", value),
            ExprKind::Subquery(query) => query_child(query),
            ExprKind::Exists(query) => Node::new("Exists").child("query", query_child(query)),
            ExprKind::NotExists(query) => {
                Node::new("NotExists").child("query", query_child(query))
            }
            ExprKind::Last => Node::new("Last"),
            ExprKind::Latest => Node::new("Latest"),
        };
        node.opt_string("alias", self.alias.as_deref())
            .flag("with_rollup", self.with_rollup)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl Dump for OrderBy {
    fn node(&self) -> Node {
        Node::new("OrderBy")
            .child("field", self.field.node())
            .opt_text("direction", self.direction.map(|d| lower(d.as_str())))
            .opt_text("nulls", self.nulls.map(|n| lower(n.as_str())))
    }
}

impl Dump for NativeQuery {
    fn node(&self) -> Node {
        Node::new("NativeQuery")
            .child("integration", self.integration.node())
            .string("query", &self.query)
            .opt_string("alias", self.alias.as_deref())
    }
}

impl Dump for Join {
    fn node(&self) -> Node {
        Node::new("Join")
            .text("join_type", lower(self.join_type.as_str()))
            .child("left", self.left.node())
            .child("right", self.right.node())
            .opt_child("condition", self.condition.as_ref().map(Dump::node))
    }
}

impl Dump for TableRef {
    fn node(&self) -> Node {
        match self {
            Self::Table { name, alias } => name.node().opt_string("alias", alias.as_deref()),
            Self::Subquery(query) => query.node(),
            Self::Join(join) => join.node(),
            Self::Native(native) => native.node(),
        }
    }
}

impl Dump for Select {
    fn node(&self) -> Node {
        Node::new("Select")
            .flag("distinct", self.distinct)
            .list("targets", nodes(&self.targets))
            .opt_child("from_table", self.from_table.as_ref().map(Dump::node))
            .opt_child("where", self.where_clause.as_ref().map(Dump::node))
            .nonempty_list("group_by", nodes(&self.group_by))
            .opt_child("having", self.having.as_ref().map(Dump::node))
            .nonempty_list("order_by", nodes(&self.order_by))
            .opt_child("limit", self.limit.as_ref().map(Dump::node))
            .opt_child("offset", self.offset.as_ref().map(Dump::node))
            .params("using", self.using.as_ref())
            .opt_string("alias", self.alias.as_deref())
    }
}

impl Dump for Union {
    fn node(&self) -> Node {
        Node::new("Union")
            .text("unique", self.distinct)
            .child("left", self.left.node())
            .child("right", self.right.node())
            .opt_string("alias", self.alias.as_deref())
    }
}

impl Dump for Query {
    fn node(&self) -> Node {
        match self {
            Self::Select(select) => select.node(),
            Self::Union(union) => union.node(),
        }
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

impl Dump for Insert {
    fn node(&self) -> Node {
        let node = Node::new("Insert")
            .child("table", self.table.node())
            .opt_text(
                "columns",
                (!self.columns.is_empty()).then(|| format!("{:?}", self.columns)),
            );
        match &self.source {
            InsertSource::Values(rows) => node.list(
                "values",
                rows.iter()
                    .map(|row| Node::new("Tuple").list("items", nodes(row)))
                    .collect(),
            ),
            InsertSource::Query(query) => node.child("from_select", query.node()),
        }
    }
}

impl Dump for Assignment {
    fn node(&self) -> Node {
        Node::new("Assignment")
            .string("column", &self.column)
            .child("value", self.value.node())
    }
}

impl Dump for Update {
    fn node(&self) -> Node {
        Node::new("Update")
            .child("table", self.table.node())
            .list("update_columns", nodes(&self.assignments))
            .opt_child("where", self.where_clause.as_ref().map(Dump::node))
    }
}

impl Dump for Delete {
    fn node(&self) -> Node {
        Node::new("Delete")
            .child("table", self.table.node())
            .opt_child("where", self.where_clause.as_ref().map(Dump::node))
    }
}

impl Dump for Set {
    fn node(&self) -> Node {
        let node = Node::new("Set").opt_text("scope", self.scope.map(|s| lower(s.as_str())));
        match &self.kind {
            SetKind::List(items) => node.list("set_list", nodes(items)),
            SetKind::Assign { name, value } => node
                .child("name", name.node())
                .child("value", value.node()),
            SetKind::Names { value, collate } => node
                .string("category", "names")
                .child("value", value.node())
                .opt_child("collate", collate.as_ref().map(Dump::node)),
            SetKind::Charset(value) => node
                .string("category", "charset")
                .child("value", value.node()),
            SetKind::Transaction {
                isolation_level,
                access_mode,
            } => node
                .string("category", "transaction")
                .opt_text("isolation_level", isolation_level.map(|l| lower(l.as_str())))
                .opt_text("access_mode", access_mode.map(|m| lower(m.as_str()))),
            SetKind::Category { category, value } => node
                .string("category", &lower(category))
                .child("value", value.node()),
        }
    }
}

impl Dump for Show {
    fn node(&self) -> Node {
        Node::new("Show")
            .string("category", &lower(&self.category))
            .opt_child("from_table", self.from_table.as_ref().map(Dump::node))
            .opt_string("like", self.like.as_deref())
            .opt_child("where", self.where_clause.as_ref().map(Dump::node))
    }
}

impl Dump for AlterTable {
    fn node(&self) -> Node {
        Node::new("AlterTable")
            .child("target", self.target.node())
            .string("arg", &self.arg)
    }
}

impl Dump for CreateDatabase {
    fn node(&self) -> Node {
        Node::new("CreateDatabase")
            .child("name", self.name.node())
            .opt_string("engine", self.engine.as_deref())
            .params("parameters", self.parameters.as_ref())
            .flag("is_replace", self.is_replace)
            .flag("if_not_exists", self.if_not_exists)
    }
}

impl Dump for AlterDatabase {
    fn node(&self) -> Node {
        Node::new("AlterDatabase")
            .child("name", self.name.node())
            .text("altered_params", &self.altered_params)
    }
}

impl Dump for UpdateDatabase {
    fn node(&self) -> Node {
        Node::new("UpdateDatabase")
            .child("name", self.name.node())
            .text("updated_params", &self.updated_params)
    }
}

impl Dump for DropDatabase {
    fn node(&self) -> Node {
        Node::new("DropDatabase")
            .child("name", self.name.node())
            .flag("if_exists", self.if_exists)
    }
}

impl Dump for CreateView {
    fn node(&self) -> Node {
        Node::new("CreateView")
            .child("name", self.name.node())
            .opt_child("from_table", self.from_table.as_ref().map(Dump::node))
            .string("query_str", &self.query_str)
            .params("using", self.using.as_ref())
            .flag("is_replace", self.is_replace)
            .flag("if_not_exists", self.if_not_exists)
    }
}

impl Dump for AlterView {
    fn node(&self) -> Node {
        Node::new("AlterView")
            .child("name", self.name.node())
            .opt_child("from_table", self.from_table.as_ref().map(Dump::node))
            .string("query_str", &self.query_str)
            .params("using", self.using.as_ref())
    }
}

impl Dump for DropView {
    fn node(&self) -> Node {
        Node::new("DropView")
            .list("names", nodes(&self.names))
            .flag("if_exists", self.if_exists)
    }
}

impl Dump for TableColumn {
    fn node(&self) -> Node {
        Node::new("TableColumn")
            .string("name", &self.name)
            .string("type", &lower(&self.data_type.name))
            .opt_text(
                "length",
                (!self.data_type.args.is_empty()).then(|| format!("{:?}", self.data_type.args)),
            )
            .opt_text("nullable", self.nullable)
            .opt_child("default", self.default.as_ref().map(Dump::node))
            .flag("is_primary_key", self.is_primary_key)
    }
}

impl Dump for CreateTable {
    fn node(&self) -> Node {
        let node = Node::new("CreateTable")
            .child("name", self.name.node())
            .flag("is_replace", self.is_replace)
            .flag("if_not_exists", self.if_not_exists);
        match &self.source {
            CreateTableSource::Columns(columns) => node.list("columns", nodes(columns)),
            CreateTableSource::Query(query) => node.child("from_select", query.node()),
        }
    }
}

impl Dump for DropTables {
    fn node(&self) -> Node {
        Node::new("DropTables")
            .list("tables", nodes(&self.tables))
            .flag("if_exists", self.if_exists)
    }
}

impl Dump for CreateKnowledgeBaseIndex {
    fn node(&self) -> Node {
        Node::new("CreateKnowledgeBaseIndex").child("name", self.name.node())
    }
}

impl Dump for DropDataset {
    fn node(&self) -> Node {
        Node::new("DropDataset")
            .child("name", self.name.node())
            .flag("if_exists", self.if_exists)
    }
}

impl Dump for Evaluate {
    fn node(&self) -> Node {
        Node::new("Evaluate")
            .child("name", self.name.node())
            .string("query_str", &self.query_str)
            .params("using", self.using.as_ref())
    }
}

impl Dump for Statement {
    fn node(&self) -> Node {
        match self {
            Self::Query(query) => query.node(),
            Self::Insert(insert) => insert.node(),
            Self::Update(update) => update.node(),
            Self::Delete(delete) => delete.node(),
            Self::Set(set) => set.node(),
            Self::StartTransaction | Self::Commit | Self::Rollback => Node::new(self.kind_name()),
            Self::Explain(target) => Node::new("Explain").child("target", target.node()),
            Self::Show(show) => show.node(),
            Self::AlterTable(alter) => alter.node(),
            Self::CreateDatabase(create) => create.node(),
            Self::AlterDatabase(alter) => alter.node(),
            Self::UpdateDatabase(update) => update.node(),
            Self::DropDatabase(drop) => drop.node(),
            Self::CreateView(create) => create.node(),
            Self::AlterView(alter) => alter.node(),
            Self::DropView(drop) => drop.node(),
            Self::CreateTable(create) => create.node(),
            Self::DropTables(drop) => drop.node(),
            Self::CreateKnowledgeBaseIndex(create) => create.node(),
            Self::DropDataset(drop) => drop.node(),
            Self::Evaluate(evaluate) => evaluate.node(),
        }
    }
}

macro_rules! impl_dump_methods {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Returns the structural dump of this node.
                #[must_use]
                pub fn dump(&self) -> String {
                    Dump::dump_at(self, 0)
                }

                /// Returns the structural dump indented `depth` levels.
                #[must_use]
                pub fn dump_at(&self, depth: usize) -> String {
                    Dump::dump_at(self, depth)
                }
            }
        )*
    };
}

impl_dump_methods!(Statement, Query, Expr, TableRef);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::BinaryOp;

    #[test]
    fn test_flat_node_is_single_line() {
        assert_eq!(
            Expr::identifier("t.col").dump(),
            r#"Identifier(parts=["t", "col"])"#
        );
        assert_eq!(Expr::null().dump(), "NullConstant()");
        assert_eq!(
            Expr::bareword("ON").dump(),
            r#"Constant(value="ON", with_quotes=false)"#
        );
    }

    #[test]
    fn test_nested_node_layout() {
        let expr = Expr::binary(BinaryOp::Add, Expr::integer(1), Expr::integer(2));
        assert_eq!(
            expr.dump(),
            "BinaryOperation(\n  op=+,\n  args=[\n    Constant(value=1),\n    Constant(value=2),\n  ],\n)"
        );
    }

    #[test]
    fn test_dump_at_indents_every_line() {
        let expr = Expr::unary(crate::ast::UnaryOp::Not, Expr::identifier("a"));
        let dump = expr.dump_at(1);
        assert!(dump.starts_with("  UnaryOperation(\n"));
        assert!(dump.ends_with("\n  )"));
    }

    #[test]
    fn test_parentheses_are_not_dumped() {
        let plain = Expr::identifier("a").eq(Expr::integer(1));
        let wrapped = plain.clone().parenthesized();
        assert_eq!(plain.dump(), wrapped.dump());
    }

    #[test]
    fn test_alias_is_dumped() {
        assert_eq!(
            Expr::identifier("a").with_alias("b").dump(),
            r#"Identifier(parts=["a"], alias="b")"#
        );
    }
}
