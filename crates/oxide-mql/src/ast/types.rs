//! Data types and column definitions.

use super::expression::Expr;

/// A data type as written in `CAST` or a column definition.
///
/// Integration engines accept arbitrary type names (`vector`, `json`, `serial`...),
/// so the name is kept as written rather than mapped onto a closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    /// Type name as written.
    pub name: String,
    /// Length, precision or scale arguments, e.g. `VARCHAR(255)` or `DECIMAL(10, 2)`.
    pub args: Vec<u32>,
}

impl DataType {
    /// Creates a data type without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Adds arguments to the type.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = u32>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Returns the SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let name = self.name.to_ascii_uppercase();
        if self.args.is_empty() {
            return name;
        }
        let args: Vec<String> = self.args.iter().map(u32::to_string).collect();
        format!("{name}({})", args.join(", "))
    }
}

/// A column in `CREATE TABLE name (...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// `Some(false)` for `NOT NULL`, `Some(true)` for an explicit `NULL`.
    pub nullable: Option<bool>,
    /// `DEFAULT expr`.
    pub default: Option<Expr>,
    /// Set by an inline `PRIMARY KEY` or a table-level `PRIMARY KEY (...)` naming this column.
    pub is_primary_key: bool,
}

impl TableColumn {
    /// Creates a column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: None,
            default: None,
            is_primary_key: false,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, expr: Expr) -> Self {
        self.default = Some(expr);
        self
    }
}
