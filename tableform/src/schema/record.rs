//! Records: objects a form can read initial values from and write back to

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// A row-like object with named values
///
/// Forms read initial data from a record with [`Record::get`] and write
/// validated data back with [`Record::set`].
pub trait Record {
    /// Get the value stored under `column`, if the record has that attribute
    fn get(&self, column: &str) -> Option<FieldValue>;

    /// Store `value` under `column`
    fn set(&mut self, column: &str, value: FieldValue);
}

/// Map-backed record preserving insertion order
///
/// # Examples
///
/// ```rust
/// use tableform::schema::{Record, Row};
/// use tableform::value::FieldValue;
///
/// let mut row = Row::new().with("title", "Dune");
/// row.set("rating", FieldValue::Int(5));
///
/// assert_eq!(row.get("title"), Some(FieldValue::from("Dune")));
/// assert_eq!(row.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, FieldValue>,
}

impl Row {
    /// Create an empty row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Number of stored values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no values are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over stored values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Record for Row {
    fn get(&self, column: &str) -> Option<FieldValue> {
        self.values.get(column).cloned()
    }

    fn set(&mut self, column: &str, value: FieldValue) {
        self.values.insert(column.to_string(), value);
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
