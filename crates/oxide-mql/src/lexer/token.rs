//! Token types for the lexer.

use std::fmt;

use super::Span;
use crate::ast::ParamMap;

/// Dialect keywords.
///
/// Keyword matching is case-insensitive. Only [`Keyword::is_reserved`] keywords are
/// barred from identifier positions; the rest double as plain names (`view.t`,
/// `information_schema.databases`, a column called `status`...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Queries
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    Distinct,
    All,
    As,
    Asc,
    Desc,
    Nulls,
    First,
    Last,
    Latest,
    With,
    Rollup,
    Union,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    On,
    Using,

    // Data manipulation
    Insert,
    Into,
    Values,
    Update,
    Delete,
    Set,
    Table,

    // Data definition
    Create,
    Alter,
    Drop,
    Replace,
    Database,
    Schema,
    Project,
    View,
    Index,
    KnowledgeBase,
    Dataset,
    If,
    Exists,
    Engine,
    Parameters,
    Primary,
    Key,
    Default,

    // Model workflow and utility statements
    Evaluate,
    Explain,
    Show,

    // Expressions
    And,
    Or,
    Not,
    In,
    Is,
    Like,
    Between,
    Null,
    True,
    False,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    Interval,

    // Session
    Global,
    Session,
    Names,
    Charset,
    Character,
    Collate,
    Transaction,
    Isolation,
    Level,
    Read,
    Write,
    Only,
    Committed,
    Uncommitted,
    Repeatable,
    Serializable,
    Start,
    Begin,
    Commit,
    Rollback,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let keyword = match s.to_ascii_uppercase().as_str() {
            "SELECT" => Self::Select,
            "FROM" => Self::From,
            "WHERE" => Self::Where,
            "GROUP" => Self::Group,
            "BY" => Self::By,
            "HAVING" => Self::Having,
            "ORDER" => Self::Order,
            "LIMIT" => Self::Limit,
            "OFFSET" => Self::Offset,
            "DISTINCT" => Self::Distinct,
            "ALL" => Self::All,
            "AS" => Self::As,
            "ASC" => Self::Asc,
            "DESC" => Self::Desc,
            "NULLS" => Self::Nulls,
            "FIRST" => Self::First,
            "LAST" => Self::Last,
            "LATEST" => Self::Latest,
            "WITH" => Self::With,
            "ROLLUP" => Self::Rollup,
            "UNION" => Self::Union,
            "JOIN" => Self::Join,
            "INNER" => Self::Inner,
            "LEFT" => Self::Left,
            "RIGHT" => Self::Right,
            "FULL" => Self::Full,
            "OUTER" => Self::Outer,
            "CROSS" => Self::Cross,
            "ON" => Self::On,
            "USING" => Self::Using,
            "INSERT" => Self::Insert,
            "INTO" => Self::Into,
            "VALUES" => Self::Values,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            "SET" => Self::Set,
            "TABLE" => Self::Table,
            "CREATE" => Self::Create,
            "ALTER" => Self::Alter,
            "DROP" => Self::Drop,
            "REPLACE" => Self::Replace,
            "DATABASE" => Self::Database,
            "SCHEMA" => Self::Schema,
            "PROJECT" => Self::Project,
            "VIEW" => Self::View,
            "INDEX" => Self::Index,
            "KNOWLEDGE_BASE" => Self::KnowledgeBase,
            "DATASET" => Self::Dataset,
            "IF" => Self::If,
            "EXISTS" => Self::Exists,
            "ENGINE" => Self::Engine,
            "PARAMETERS" => Self::Parameters,
            "PRIMARY" => Self::Primary,
            "KEY" => Self::Key,
            "DEFAULT" => Self::Default,
            "EVALUATE" => Self::Evaluate,
            "EXPLAIN" => Self::Explain,
            "SHOW" => Self::Show,
            "AND" => Self::And,
            "OR" => Self::Or,
            "NOT" => Self::Not,
            "IN" => Self::In,
            "IS" => Self::Is,
            "LIKE" => Self::Like,
            "BETWEEN" => Self::Between,
            "NULL" => Self::Null,
            "TRUE" => Self::True,
            "FALSE" => Self::False,
            "CASE" => Self::Case,
            "WHEN" => Self::When,
            "THEN" => Self::Then,
            "ELSE" => Self::Else,
            "END" => Self::End,
            "CAST" => Self::Cast,
            "INTERVAL" => Self::Interval,
            "GLOBAL" => Self::Global,
            "SESSION" => Self::Session,
            "NAMES" => Self::Names,
            "CHARSET" => Self::Charset,
            "CHARACTER" => Self::Character,
            "COLLATE" => Self::Collate,
            "TRANSACTION" => Self::Transaction,
            "ISOLATION" => Self::Isolation,
            "LEVEL" => Self::Level,
            "READ" => Self::Read,
            "WRITE" => Self::Write,
            "ONLY" => Self::Only,
            "COMMITTED" => Self::Committed,
            "UNCOMMITTED" => Self::Uncommitted,
            "REPEATABLE" => Self::Repeatable,
            "SERIALIZABLE" => Self::Serializable,
            "START" => Self::Start,
            "BEGIN" => Self::Begin,
            "COMMIT" => Self::Commit,
            "ROLLBACK" => Self::Rollback,
            _ => return None,
        };
        Some(keyword)
    }

    /// Returns the keyword as an uppercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::As => "AS",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::Latest => "LATEST",
            Self::With => "WITH",
            Self::Rollup => "ROLLUP",
            Self::Union => "UNION",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::On => "ON",
            Self::Using => "USING",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Set => "SET",
            Self::Table => "TABLE",
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Drop => "DROP",
            Self::Replace => "REPLACE",
            Self::Database => "DATABASE",
            Self::Schema => "SCHEMA",
            Self::Project => "PROJECT",
            Self::View => "VIEW",
            Self::Index => "INDEX",
            Self::KnowledgeBase => "KNOWLEDGE_BASE",
            Self::Dataset => "DATASET",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::Engine => "ENGINE",
            Self::Parameters => "PARAMETERS",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Default => "DEFAULT",
            Self::Evaluate => "EVALUATE",
            Self::Explain => "EXPLAIN",
            Self::Show => "SHOW",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Like => "LIKE",
            Self::Between => "BETWEEN",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
            Self::Interval => "INTERVAL",
            Self::Global => "GLOBAL",
            Self::Session => "SESSION",
            Self::Names => "NAMES",
            Self::Charset => "CHARSET",
            Self::Character => "CHARACTER",
            Self::Collate => "COLLATE",
            Self::Transaction => "TRANSACTION",
            Self::Isolation => "ISOLATION",
            Self::Level => "LEVEL",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::Only => "ONLY",
            Self::Committed => "COMMITTED",
            Self::Uncommitted => "UNCOMMITTED",
            Self::Repeatable => "REPEATABLE",
            Self::Serializable => "SERIALIZABLE",
            Self::Start => "START",
            Self::Begin => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
        }
    }

    /// Returns true if the keyword can never be used as a bare identifier.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::From
                | Self::Where
                | Self::Group
                | Self::By
                | Self::Having
                | Self::Order
                | Self::Limit
                | Self::Offset
                | Self::Distinct
                | Self::All
                | Self::As
                | Self::Asc
                | Self::Desc
                | Self::With
                | Self::Union
                | Self::Join
                | Self::Inner
                | Self::Left
                | Self::Right
                | Self::Full
                | Self::Outer
                | Self::Cross
                | Self::On
                | Self::Using
                | Self::Insert
                | Self::Into
                | Self::Values
                | Self::Update
                | Self::Delete
                | Self::Set
                | Self::Table
                | Self::Create
                | Self::Alter
                | Self::Drop
                | Self::Exists
                | Self::And
                | Self::Or
                | Self::Not
                | Self::In
                | Self::Is
                | Self::Like
                | Self::Between
                | Self::Null
                | Self::True
                | Self::False
                | Self::Case
                | Self::When
                | Self::Then
                | Self::Else
                | Self::End
                | Self::Cast
                | Self::Interval
        )
    }

    /// Returns true if a call like `left(...)` or `database()` names a function.
    #[must_use]
    pub const fn can_name_function(&self) -> bool {
        !self.is_reserved()
            || matches!(self, Self::Left | Self::Right | Self::Insert | Self::Values)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14 or 1e10)
    Float(f64),
    /// Single-quoted string literal
    String(String),
    /// Double-quoted string literal; also accepted as an alias
    DoubleQuotedString(String),
    /// JSON object literal, decoded by the lexer
    Json(ParamMap),

    // Names
    /// Plain or backtick-quoted identifier
    Identifier(String),
    /// Dialect keyword
    Keyword(Keyword),
    /// `@name`
    Variable(String),
    /// `@@name`, including dotted forms such as `@@session.autocommit`
    SystemVariable(String),
    /// `?`
    Question,
    /// `:name`
    NamedParameter(String),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// ->
    Arrow,
    /// ~
    Tilde,
    /// !~
    NotTilde,
    /// <=>
    CosineDistance,
    /// <->
    L2Distance,
    /// <+>
    L1Distance,
    /// <#>
    InnerProduct,
    /// <~>
    HammingDistance,
    /// <%>
    JaccardDistance,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Special
    /// End of input
    Eof,
    /// Invalid input; the message describes what went wrong
    Error(String),
}

impl TokenKind {
    /// Returns the operator or punctuation symbol, if the kind is one.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
            Self::Arrow => "->",
            Self::Tilde => "~",
            Self::NotTilde => "!~",
            Self::CosineDistance => "<=>",
            Self::L2Distance => "<->",
            Self::L1Distance => "<+>",
            Self::InnerProduct => "<#>",
            Self::HammingDistance => "<~>",
            Self::JaccardDistance => "<%>",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Question => "?",
            _ => return None,
        };
        Some(symbol)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = self.symbol() {
            return write!(f, "'{symbol}'");
        }
        match self {
            Self::Integer(value) => write!(f, "integer {value}"),
            Self::Float(value) => write!(f, "float {value}"),
            Self::String(value) => write!(f, "string '{value}'"),
            Self::DoubleQuotedString(value) => write!(f, "string \"{value}\""),
            Self::Json(_) => f.write_str("JSON object"),
            Self::Identifier(name) => write!(f, "identifier {name}"),
            Self::Keyword(keyword) => write!(f, "keyword {keyword}"),
            Self::Variable(name) => write!(f, "variable @{name}"),
            Self::SystemVariable(name) => write!(f, "variable @@{name}"),
            Self::NamedParameter(name) => write!(f, "parameter :{name}"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(message) => f.write_str(message),
            _ => f.write_str("token"),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The source span.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword token.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the decoded value of the token.
    ///
    /// Strings and identifiers yield their unquoted payload, variables and named
    /// parameters their bare name, keywords their uppercase spelling.
    #[must_use]
    pub fn value(&self) -> String {
        match &self.kind {
            TokenKind::Integer(value) => value.to_string(),
            TokenKind::Float(value) => value.to_string(),
            TokenKind::String(value)
            | TokenKind::DoubleQuotedString(value)
            | TokenKind::Identifier(value)
            | TokenKind::Variable(value)
            | TokenKind::SystemVariable(value)
            | TokenKind::NamedParameter(value)
            | TokenKind::Error(value) => value.clone(),
            TokenKind::Json(map) => map.to_string(),
            TokenKind::Keyword(keyword) => keyword.as_str().to_string(),
            TokenKind::Eof => String::new(),
            other => other.symbol().unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str_case_insensitive() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("SeLeCt"), Some(Keyword::Select));
        assert_eq!(
            Keyword::from_str("knowledge_base"),
            Some(Keyword::KnowledgeBase)
        );
        assert_eq!(Keyword::from_str("predictors"), None);
    }

    #[test]
    fn test_keyword_as_str_round_trips() {
        for kw in [
            Keyword::Select,
            Keyword::KnowledgeBase,
            Keyword::Serializable,
            Keyword::Latest,
        ] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_reserved_keywords() {
        assert!(Keyword::Select.is_reserved());
        assert!(Keyword::Using.is_reserved());
        assert!(!Keyword::View.is_reserved());
        assert!(!Keyword::Database.is_reserved());
        assert!(!Keyword::Engine.is_reserved());
    }

    #[test]
    fn test_function_named_keywords() {
        assert!(Keyword::Database.can_name_function());
        assert!(Keyword::Left.can_name_function());
        assert!(!Keyword::Select.can_name_function());
        assert!(!Keyword::Cast.can_name_function());
        assert!(!Keyword::Exists.can_name_function());
    }

    #[test]
    fn test_token_value() {
        let span = Span::new(0, 1);
        assert_eq!(
            Token::new(TokenKind::Keyword(Keyword::Select), span).value(),
            "SELECT"
        );
        assert_eq!(
            Token::new(TokenKind::SystemVariable("version".into()), span).value(),
            "version"
        );
        assert_eq!(Token::new(TokenKind::CosineDistance, span).value(), "<=>");
        assert_eq!(Token::new(TokenKind::Integer(42), span).value(), "42");
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Comma.to_string(), "','");
        assert_eq!(
            TokenKind::Keyword(Keyword::From).to_string(),
            "keyword FROM"
        );
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }
}
