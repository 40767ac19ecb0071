//! Expression AST types.

use super::query::Query;
use super::types::DataType;

/// Binding strength of the loosest operators, used by the renderer.
pub(crate) mod precedence {
    pub const OR: u8 = 1;
    pub const AND: u8 = 2;
    pub const NOT: u8 = 3;
    pub const COMPARISON: u8 = 4;
    pub const ADDITIVE: u8 = 5;
    pub const MULTIPLICATIVE: u8 = 6;
    pub const JSON_PATH: u8 = 7;
    pub const NEGATION: u8 = 8;
    pub const PRIMARY: u8 = 9;
}

/// A dotted name such as `db.table.column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Name parts in source order; never empty.
    pub parts: Vec<String>,
}

impl Identifier {
    /// Creates an identifier from its parts.
    #[must_use]
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a dotted path such as `int1.model_name` into parts.
    #[must_use]
    pub fn path(dotted: &str) -> Self {
        Self::new(dotted.split('.'))
    }

    /// Returns the last part of the path.
    #[must_use]
    pub fn name(&self) -> &str {
        self.parts.last().map_or("", String::as_str)
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// Quoted string literal.
    String(String),
    /// Unquoted word kept verbatim, e.g. `DEFAULT` or `ON` on the value side of `SET`.
    Bareword(String),
    /// Boolean literal.
    Boolean(bool),
}

/// A bind parameter marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// `?`
    Positional,
    /// `:name`
    Named(String),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Concat,

    // JSON path
    JsonGet,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Is,
    IsNot,
    Like,
    NotLike,
    In,
    NotIn,
    Match,
    NotMatch,

    // Vector distance
    CosineDistance,
    L2Distance,
    L1Distance,
    InnerProduct,
    HammingDistance,
    JaccardDistance,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
            Self::JsonGet => "->",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Match => "~",
            Self::NotMatch => "!~",
            Self::CosineDistance => "<=>",
            Self::L2Distance => "<->",
            Self::L1Distance => "<+>",
            Self::InnerProduct => "<#>",
            Self::HammingDistance => "<~>",
            Self::JaccardDistance => "<%>",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => precedence::OR,
            Self::And => precedence::AND,
            Self::Add | Self::Sub | Self::Concat => precedence::ADDITIVE,
            Self::Mul | Self::Div | Self::Mod => precedence::MULTIPLICATIVE,
            Self::JsonGet => precedence::JSON_PATH,
            _ => precedence::COMPARISON,
        }
    }

    /// Returns the negated form of `LIKE` and `IN`.
    #[must_use]
    pub const fn negated(self) -> Option<Self> {
        match self {
            Self::Like => Some(Self::NotLike),
            Self::In => Some(Self::NotIn),
            _ => None,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Neg => precedence::NEGATION,
            Self::Not => precedence::NOT,
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function name, as written.
    pub name: String,
    /// Qualifier of a namespaced call such as `engine.fn(...)`.
    pub namespace: Option<String>,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// Secondary argument of `EXTRACT(unit FROM expr)` style calls.
    pub from_arg: Option<Box<Expr>>,
}

/// One `WHEN ... THEN ...` arm of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    pub condition: Expr,
    pub result: Expr,
}

/// The shape of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A column or other dotted name; a trailing `*` part means `t.*`.
    Identifier(Identifier),
    /// A literal value.
    Constant(Literal),
    /// `NULL`.
    Null,
    /// `@name` or `@@name`.
    Variable { name: String, is_system: bool },
    /// `?` or `:name`.
    Parameter(Parameter),
    /// `*`.
    Star,
    /// A unary operation.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// A binary operation.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    /// A function call.
    Function(Function),
    /// A parenthesized, comma-separated list.
    Tuple(Vec<Expr>),
    /// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`.
    Case {
        operand: Option<Box<Expr>>,
        when_clauses: Vec<WhenClause>,
        else_result: Option<Box<Expr>>,
    },
    /// `CAST(arg AS type[(p, ...)])`.
    TypeCast { arg: Box<Expr>, data_type: DataType },
    /// `INTERVAL '1 day'`.
    Interval(String),
    /// A subquery in expression position.
    Subquery(Box<Query>),
    /// `EXISTS (subquery)`.
    Exists(Box<Query>),
    /// `NOT EXISTS (subquery)`.
    NotExists(Box<Query>),
    /// `LAST`, the last value of a time series.
    Last,
    /// `LATEST`, the most recent point of a time series.
    Latest,
}

/// An expression together with the decorations the grammar allows on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The expression itself.
    pub kind: ExprKind,
    /// `AS alias` on a select target.
    pub alias: Option<String>,
    /// Set when the source wrapped the expression in parentheses.
    pub parentheses: bool,
    /// `WITH ROLLUP` on the last GROUP BY element.
    pub with_rollup: bool,
}

impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Self::new(kind)
    }
}

impl Expr {
    /// Wraps an expression kind without decorations.
    #[must_use]
    pub const fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            alias: None,
            parentheses: false,
            with_rollup: false,
        }
    }

    /// Creates a dotted identifier, e.g. `Expr::identifier("t.col")`.
    #[must_use]
    pub fn identifier(dotted: &str) -> Self {
        Self::new(ExprKind::Identifier(Identifier::path(dotted)))
    }

    /// Creates an integer constant.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::new(ExprKind::Constant(Literal::Integer(value)))
    }

    /// Creates a float constant.
    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::new(ExprKind::Constant(Literal::Float(value)))
    }

    /// Creates a quoted string constant.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::Constant(Literal::String(value.into())))
    }

    /// Creates an unquoted word constant.
    #[must_use]
    pub fn bareword(value: impl Into<String>) -> Self {
        Self::new(ExprKind::Constant(Literal::Bareword(value.into())))
    }

    /// Creates a boolean constant.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::new(ExprKind::Constant(Literal::Boolean(value)))
    }

    /// Creates `NULL`.
    #[must_use]
    pub const fn null() -> Self {
        Self::new(ExprKind::Null)
    }

    /// Creates `*`.
    #[must_use]
    pub const fn star() -> Self {
        Self::new(ExprKind::Star)
    }

    /// Creates `@name` or, with `is_system`, `@@name`.
    #[must_use]
    pub fn variable(name: impl Into<String>, is_system: bool) -> Self {
        Self::new(ExprKind::Variable {
            name: name.into(),
            is_system,
        })
    }

    /// Creates a parameter marker.
    #[must_use]
    pub const fn parameter(parameter: Parameter) -> Self {
        Self::new(ExprKind::Parameter(parameter))
    }

    /// Creates a binary operation.
    #[must_use]
    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Self::new(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Creates a unary operation.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::new(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Creates `expr BETWEEN low AND high`.
    #[must_use]
    pub fn between(expr: Self, low: Self, high: Self) -> Self {
        Self::new(ExprKind::Between {
            expr: Box::new(expr),
            low: Box::new(low),
            high: Box::new(high),
            negated: false,
        })
    }

    /// Creates a plain function call.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::new(ExprKind::Function(Function {
            name: name.into(),
            namespace: None,
            args,
            distinct: false,
            from_arg: None,
        }))
    }

    /// Creates a tuple.
    #[must_use]
    pub const fn tuple(items: Vec<Self>) -> Self {
        Self::new(ExprKind::Tuple(items))
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Marks the expression as written inside parentheses.
    #[must_use]
    pub const fn parenthesized(mut self) -> Self {
        self.parentheses = true;
        self
    }

    /// Creates `self = other`.
    #[must_use]
    pub fn eq(self, other: Self) -> Self {
        Self::binary(BinaryOp::Eq, self, other)
    }

    /// Creates `self AND other`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::binary(BinaryOp::And, self, other)
    }

    /// Creates `self OR other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::binary(BinaryOp::Or, self, other)
    }

    /// Binding strength of this expression as an operand.
    #[must_use]
    pub(crate) const fn precedence(&self) -> u8 {
        match &self.kind {
            ExprKind::Binary { op, .. } => op.precedence(),
            ExprKind::Unary { op, .. } => op.precedence(),
            ExprKind::Between { .. } => precedence::COMPARISON,
            _ => precedence::PRIMARY,
        }
    }

    /// Returns true for an integer or float constant. A minus sign in front
    /// of one is folded into the literal when parsed.
    pub(crate) const fn is_number(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Constant(Literal::Integer(_) | Literal::Float(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_path() {
        let ident = Identifier::path("int1.model_name");
        assert_eq!(ident.parts, vec!["int1", "model_name"]);
        assert_eq!(ident.name(), "model_name");
    }

    #[test]
    fn test_operator_precedence_order() {
        assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() < UnaryOp::Not.precedence());
        assert!(UnaryOp::Not.precedence() < BinaryOp::Eq.precedence());
        assert_eq!(BinaryOp::Eq.precedence(), BinaryOp::CosineDistance.precedence());
        assert!(BinaryOp::Eq.precedence() < BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mul.precedence());
        assert!(BinaryOp::Mul.precedence() < BinaryOp::JsonGet.precedence());
        assert!(BinaryOp::JsonGet.precedence() < UnaryOp::Neg.precedence());
    }

    #[test]
    fn test_negated_operators() {
        assert_eq!(BinaryOp::Like.negated(), Some(BinaryOp::NotLike));
        assert_eq!(BinaryOp::In.negated(), Some(BinaryOp::NotIn));
        assert_eq!(BinaryOp::Eq.negated(), None);
    }

    #[test]
    fn test_builders() {
        let expr = Expr::identifier("a").eq(Expr::integer(1)).with_alias("x");
        assert_eq!(expr.alias.as_deref(), Some("x"));
        assert!(matches!(
            expr.kind,
            ExprKind::Binary {
                op: BinaryOp::Eq,
                ..
            }
        ));
        assert!(Expr::integer(-3).is_number());
        assert!(!Expr::string("3").is_number());
    }
}
