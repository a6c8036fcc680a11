//! Column descriptions
//!
//! A [`Column`] is one declared attribute of a [`Table`](super::Table): its
//! name, type tag, requiredness, default and type-specific metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{DefaultValue, FieldValue};

/// Declared column type tag
///
/// Tag names follow the ORM column class names (`Varchar`, `Timestamp`, ...)
/// and are written the same way in schema files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Auto-incrementing integer, usually the primary key
    Serial,
    /// 32-bit integer
    Integer,
    /// 16-bit integer
    SmallInt,
    /// 64-bit integer
    BigInt,
    /// Length-limited string
    Varchar,
    /// Unlimited text
    Text,
    /// UUID
    #[serde(rename = "UUID", alias = "Uuid")]
    Uuid,
    /// Boolean
    Boolean,
    /// Arbitrary precision number
    Numeric,
    /// Alias of numeric
    Decimal,
    /// Single precision float
    Real,
    /// Double precision float
    DoublePrecision,
    /// Date and time
    Timestamp,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Time interval
    Interval,
    /// JSON document
    #[serde(rename = "JSON", alias = "Json")]
    Json,
    /// Binary JSON document
    #[serde(rename = "JSONB", alias = "Jsonb")]
    Jsonb,
    /// Raw bytes
    Bytea,
    /// Reference to another table's primary key
    ForeignKey,
}

impl ColumnType {
    /// Type tag name as written in schema files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Serial => "Serial",
            Self::Integer => "Integer",
            Self::SmallInt => "SmallInt",
            Self::BigInt => "BigInt",
            Self::Varchar => "Varchar",
            Self::Text => "Text",
            Self::Uuid => "UUID",
            Self::Boolean => "Boolean",
            Self::Numeric => "Numeric",
            Self::Decimal => "Decimal",
            Self::Real => "Real",
            Self::DoublePrecision => "DoublePrecision",
            Self::Timestamp => "Timestamp",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Interval => "Interval",
            Self::Json => "JSON",
            Self::Jsonb => "JSONB",
            Self::Bytea => "Bytea",
            Self::ForeignKey => "ForeignKey",
        }
    }

    /// Default value a column of this type gets when none is declared
    #[must_use]
    pub fn implicit_default(&self) -> DefaultValue {
        match self {
            Self::Varchar | Self::Text => DefaultValue::from(""),
            Self::Integer | Self::SmallInt | Self::BigInt => DefaultValue::from(0_i64),
            Self::Boolean => DefaultValue::from(false),
            Self::Numeric | Self::Decimal | Self::Real | Self::DoublePrecision => {
                DefaultValue::from(0.0)
            }
            Self::Timestamp => DefaultValue::Now,
            Self::Date => DefaultValue::Today,
            Self::Uuid => DefaultValue::Uuid4,
            Self::Serial
            | Self::Time
            | Self::Interval
            | Self::Json
            | Self::Jsonb
            | Self::Bytea
            | Self::ForeignKey => DefaultValue::null(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared table column
///
/// # Examples
///
/// ```rust
/// use tableform::schema::{Column, ColumnType};
///
/// let title = Column::varchar("title").required();
/// assert_eq!(title.ty, ColumnType::Varchar);
/// assert!(title.required);
///
/// let author = Column::foreign_key("book_author", "Author");
/// assert_eq!(author.references.as_deref(), Some("Author"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Declared type tag
    #[serde(rename = "type")]
    pub ty: ColumnType,
    /// Whether a value must be supplied
    #[serde(default)]
    pub required: bool,
    /// Whether the column accepts NULL
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column is the primary key
    #[serde(default)]
    pub primary_key: bool,
    /// Explicitly declared default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Referenced table, for foreign keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    /// Declared `(precision, scale)`, for numerics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digits: Option<(u32, u32)>,
    /// Declared maximum length, for varchars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

impl Column {
    /// Create a column with the given name and type
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            nullable: false,
            primary_key: false,
            default: None,
            references: None,
            digits: None,
            length: None,
        }
    }

    /// Auto-incrementing primary key column
    #[must_use]
    pub fn serial(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Serial).primary_key()
    }

    /// Integer column
    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    /// Small integer column
    #[must_use]
    pub fn small_int(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::SmallInt)
    }

    /// Big integer column
    #[must_use]
    pub fn big_int(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::BigInt)
    }

    /// Varchar column with the conventional 255 length
    #[must_use]
    pub fn varchar(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Varchar).length(255)
    }

    /// Text column
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// UUID column
    #[must_use]
    pub fn uuid(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Uuid)
    }

    /// Boolean column
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Boolean)
    }

    /// Numeric column
    #[must_use]
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Numeric)
    }

    /// Decimal column
    #[must_use]
    pub fn decimal(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Decimal)
    }

    /// Timestamp column
    #[must_use]
    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Timestamp)
    }

    /// Date column
    #[must_use]
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Date)
    }

    /// Foreign key column referencing `table`
    #[must_use]
    pub fn foreign_key(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::new(name, ColumnType::ForeignKey).references(table)
    }

    /// Mark the column as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the column as nullable
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as the primary key
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Declare a default
    #[must_use]
    pub fn default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the referenced table
    #[must_use]
    pub fn references(mut self, table: impl Into<String>) -> Self {
        self.references = Some(table.into());
        self
    }

    /// Set numeric precision and scale
    #[must_use]
    pub const fn digits(mut self, precision: u32, scale: u32) -> Self {
        self.digits = Some((precision, scale));
        self
    }

    /// Set the maximum length
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Check if this column references another table
    #[must_use]
    pub fn is_foreign_key(&self) -> bool {
        self.ty == ColumnType::ForeignKey
    }

    /// The declared default, falling back to the type's implicit default
    #[must_use]
    pub fn effective_default(&self) -> DefaultValue {
        self.default
            .clone()
            .unwrap_or_else(|| self.ty.implicit_default())
    }

    /// Resolve the effective default into a value
    #[must_use]
    pub fn default_value(&self) -> FieldValue {
        self.effective_default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builders() {
        let id = Column::serial("id");
        assert_eq!(id.ty, ColumnType::Serial);
        assert!(id.primary_key);

        let price = Column::numeric("price").digits(5, 2);
        assert_eq!(price.digits, Some((5, 2)));

        let title = Column::varchar("title").required();
        assert!(title.required);
        assert_eq!(title.length, Some(255));
    }

    #[test]
    fn test_implicit_defaults() {
        assert_eq!(Column::serial("id").default_value(), FieldValue::Null);
        assert_eq!(Column::varchar("title").default_value(), FieldValue::from(""));
        assert_eq!(Column::integer("rating").default_value(), FieldValue::Int(0));
        assert_eq!(Column::boolean("released").default_value(), FieldValue::Bool(false));
        assert_eq!(Column::numeric("price").default_value(), FieldValue::Float(0.0));
        assert_eq!(
            Column::foreign_key("book_author", "Author").default_value(),
            FieldValue::Null
        );
        assert!(matches!(
            Column::timestamp("created").default_value(),
            FieldValue::DateTime(_)
        ));
    }

    #[test]
    fn test_declared_default_wins() {
        let released = Column::boolean("released").default(true);
        assert_eq!(released.default_value(), FieldValue::Bool(true));
    }

    #[test]
    fn test_type_tag_names() {
        assert_eq!(ColumnType::Uuid.as_str(), "UUID");
        assert_eq!(ColumnType::ForeignKey.to_string(), "ForeignKey");
    }

    #[test]
    fn test_deserialize_column() {
        let column: Column = toml::from_str(
            r#"
            name = "title"
            type = "Varchar"
            required = true
            "#,
        )
        .unwrap();
        assert_eq!(column.ty, ColumnType::Varchar);
        assert!(column.required);
        assert!(column.default.is_none());

        let column: Column = toml::from_str(
            r#"
            name = "key"
            type = "UUID"
            "#,
        )
        .unwrap();
        assert_eq!(column.ty, ColumnType::Uuid);
    }
}
