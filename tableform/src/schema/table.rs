//! Table descriptions

use inflector::Inflector;
use serde::{Deserialize, Serialize};

use super::column::Column;

/// An ordered set of columns under a class name and a storage name
///
/// # Examples
///
/// ```rust
/// use tableform::schema::{Column, Table};
///
/// let author = Table::new("Author")
///     .column(Column::serial("id"))
///     .column(Column::varchar("name").required());
///
/// assert_eq!(author.tablename(), "author");
/// assert_eq!(author.column_names(), vec!["id", "name"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Class name, e.g. `Book`
    name: String,
    /// Storage name; derived from the class name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tablename: Option<String>,
    /// Columns in declaration order
    #[serde(default)]
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table description
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tablename: None,
            columns: Vec::new(),
        }
    }

    /// Override the storage name
    #[must_use]
    pub fn with_tablename(mut self, tablename: impl Into<String>) -> Self {
        self.tablename = Some(tablename.into());
        self
    }

    /// Append a column
    ///
    /// Redeclaring an existing name replaces that column in place.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == column.name) {
            *existing = column;
        } else {
            self.columns.push(column);
        }
        self
    }

    /// Class name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage name (explicit, or the class name in `snake_case`)
    #[must_use]
    pub fn tablename(&self) -> String {
        self.tablename
            .clone()
            .unwrap_or_else(|| self.name.to_snake_case())
    }

    /// Columns in declaration order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in declaration order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Foreign key columns in declaration order
    pub fn foreign_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_foreign_key())
    }

    /// The primary key column, if one is declared
    #[must_use]
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Names declared more than once, in first-seen order
    pub(crate) fn duplicate_columns(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let mut duplicates = Vec::new();
        for column in &self.columns {
            let name = column.name.as_str();
            if seen.contains(&name) {
                if !duplicates.contains(&name) {
                    duplicates.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        duplicates
    }
}
