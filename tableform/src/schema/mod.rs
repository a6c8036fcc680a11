//! Table descriptions read by the form generator
//!
//! This module models the ORM side of the adapter: tables with ordered,
//! typed columns, and records holding row values. Tables can be declared in
//! code or loaded from a TOML schema file.
//!
//! # Schema Files
//!
//! ```toml
//! [[tables]]
//! name = "Book"
//!
//! [[tables.columns]]
//! name = "id"
//! type = "Serial"
//! primary_key = true
//!
//! [[tables.columns]]
//! name = "title"
//! type = "Varchar"
//! required = true
//!
//! [[tables.columns]]
//! name = "book_author"
//! type = "ForeignKey"
//! references = "Author"
//! ```

mod column;
mod record;
mod table;

pub use column::{Column, ColumnType};
pub use record::{Record, Row};
pub use table::Table;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableFormError};

/// A collection of table descriptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Declared tables
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Parse a schema from TOML source
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not a valid schema or a table
    /// declares the same column name twice.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let schema: Self = toml::from_str(source)?;
        for table in &schema.tables {
            if let Some(column) = table.duplicate_columns().first() {
                return Err(TableFormError::DuplicateColumn {
                    table: table.name().to_string(),
                    column: (*column).to_string(),
                });
            }
        }
        Ok(schema)
    }

    /// Load a schema file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TableFormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            tables = schema.tables.len(),
            "Loaded schema"
        );
        Ok(schema)
    }

    /// Find a table by class name or storage name
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.name() == name || t.tablename() == name)
    }

    /// Find a table by class name or storage name, failing if absent
    ///
    /// # Errors
    ///
    /// Returns [`TableFormError::UnknownTable`] if no table matches.
    pub fn require_table(&self, name: &str) -> Result<&Table> {
        self.table(name)
            .ok_or_else(|| TableFormError::UnknownTable(name.to_string()))
    }
}
