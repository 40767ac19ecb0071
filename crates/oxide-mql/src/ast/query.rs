//! Query AST types: SELECT, UNION and FROM-clause sources.

use super::expression::{Expr, Identifier};
use super::params::ParamMap;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub field: Expr,
    /// The direction, when one was written.
    pub direction: Option<OrderDirection>,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
}

impl OrderBy {
    /// Orders by `field` with no explicit direction.
    #[must_use]
    pub const fn new(field: Expr) -> Self {
        Self {
            field,
            direction: None,
            nulls: None,
        }
    }

    /// Sets the direction.
    #[must_use]
    pub const fn direction(mut self, direction: OrderDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Plain JOIN.
    Join,
    /// INNER JOIN.
    Inner,
    /// LEFT [OUTER] JOIN.
    Left,
    /// RIGHT [OUTER] JOIN.
    Right,
    /// FULL [OUTER] JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
    /// Comma-separated sources, `FROM a, b`.
    Implicit,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Implicit => ",",
        }
    }
}

/// A join of two sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub left: TableRef,
    pub right: TableRef,
    pub join_type: JoinType,
    /// `ON` condition.
    pub condition: Option<Expr>,
    /// Set when the source wrapped the join in parentheses.
    pub parentheses: bool,
}

/// A query passed through verbatim to an integration: `FROM int1 (native text)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeQuery {
    /// The integration that runs the query.
    pub integration: Identifier,
    /// The text between the parentheses, trimmed.
    pub query: String,
    pub alias: Option<String>,
}

/// A source in the FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A (possibly dotted) table name.
    Table {
        name: Identifier,
        alias: Option<String>,
    },
    /// A parenthesized subquery; its alias lives on the query.
    Subquery(Query),
    /// A joined pair.
    Join(Box<Join>),
    /// A native integration query.
    Native(NativeQuery),
}

impl TableRef {
    /// Creates a table reference from a dotted name.
    #[must_use]
    pub fn table(dotted: &str) -> Self {
        Self::Table {
            name: Identifier::path(dotted),
            alias: None,
        }
    }

    /// Adds an alias to this table reference. Joins are returned unchanged.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        match self {
            Self::Table { name, .. } => Self::Table {
                name,
                alias: Some(alias.into()),
            },
            Self::Subquery(mut query) => {
                query.set_alias(Some(alias.into()));
                Self::Subquery(query)
            }
            Self::Native(mut native) => {
                native.alias = Some(alias.into());
                Self::Native(native)
            }
            join @ Self::Join(_) => join,
        }
    }

    /// Joins `right` onto this source.
    #[must_use]
    pub fn join(self, join_type: JoinType, right: Self, condition: Option<Expr>) -> Self {
        Self::Join(Box::new(Join {
            left: self,
            right,
            join_type,
            condition,
            parentheses: false,
        }))
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    /// Whether DISTINCT is specified.
    pub distinct: bool,
    /// The target list; may carry aliases.
    pub targets: Vec<Expr>,
    /// FROM source.
    pub from_table: Option<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY clause.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// ORDER BY clause.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Expr>,
    /// OFFSET clause.
    pub offset: Option<Expr>,
    /// Trailing `USING k = v, ...` options.
    pub using: Option<ParamMap>,
    /// Set when the source wrapped the query in parentheses.
    pub parentheses: bool,
    /// Alias of a subquery.
    pub alias: Option<String>,
}

impl Select {
    /// Creates `SELECT targets` with no other clause.
    #[must_use]
    pub fn new(targets: Vec<Expr>) -> Self {
        Self {
            targets,
            ..Self::default()
        }
    }

    /// Sets the FROM source.
    #[must_use]
    pub fn from(mut self, table: TableRef) -> Self {
        self.from_table = Some(table);
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn filter(mut self, condition: Expr) -> Self {
        self.where_clause = Some(condition);
        self
    }
}

/// `left UNION [ALL] right`.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub left: Query,
    pub right: Query,
    /// False for `UNION ALL`.
    pub distinct: bool,
    pub parentheses: bool,
    pub alias: Option<String>,
}

/// A query: a SELECT or a UNION chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Select(Box<Select>),
    Union(Box<Union>),
}

impl From<Select> for Query {
    fn from(select: Select) -> Self {
        Self::Select(Box::new(select))
    }
}

impl Query {
    /// Returns true if the query was written inside parentheses.
    #[must_use]
    pub fn parentheses(&self) -> bool {
        match self {
            Self::Select(select) => select.parentheses,
            Self::Union(union) => union.parentheses,
        }
    }

    pub fn set_parentheses(&mut self, parentheses: bool) {
        match self {
            Self::Select(select) => select.parentheses = parentheses,
            Self::Union(union) => union.parentheses = parentheses,
        }
    }

    /// Returns the alias of a subquery.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Select(select) => select.alias.as_deref(),
            Self::Union(union) => union.alias.as_deref(),
        }
    }

    pub fn set_alias(&mut self, alias: Option<String>) {
        match self {
            Self::Select(select) => select.alias = alias,
            Self::Union(union) => union.alias = alias,
        }
    }

    /// Returns the SELECT if this query is one.
    #[must_use]
    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            Self::Union(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ref_alias() {
        let table = TableRef::table("int1.t").alias("x");
        let TableRef::Table { name, alias } = table else {
            panic!("Expected table");
        };
        assert_eq!(name.parts, vec!["int1", "t"]);
        assert_eq!(alias.as_deref(), Some("x"));
    }

    #[test]
    fn test_query_flags() {
        let mut query = Query::from(Select::new(vec![Expr::star()]));
        assert!(!query.parentheses());
        query.set_parentheses(true);
        query.set_alias(Some("sub".into()));
        assert!(query.parentheses());
        assert_eq!(query.alias(), Some("sub"));
        assert!(query.as_select().is_some());
    }

    #[test]
    fn test_subquery_alias_moves_onto_query() {
        let sub = TableRef::Subquery(Query::from(Select::new(vec![Expr::integer(1)]))).alias("s");
        let TableRef::Subquery(query) = sub else {
            panic!("Expected subquery");
        };
        assert_eq!(query.alias(), Some("s"));
    }
}
