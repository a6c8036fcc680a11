//! Submitted form data
//!
//! [`FormData`] is a multi-value map of raw submitted strings keyed by field
//! name, as produced by decoding a urlencoded request body.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Raw submitted values, several per key allowed
///
/// # Examples
///
/// ```rust
/// use tableform::forms::FormData;
///
/// let data: FormData = [("title", "Dune"), ("tag", "a"), ("tag", "b")]
///     .into_iter()
///     .collect();
///
/// assert_eq!(data.get("title"), Some("Dune"));
/// assert_eq!(data.get_all("tag"), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: IndexMap<String, Vec<String>>,
}

impl FormData {
    /// Create empty form data
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `key`, keeping earlier values
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Builder-style [`FormData::append`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// First value submitted under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values submitted under `key`
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check if any value was submitted under `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Check if nothing was submitted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.append(key, value);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key() {
        let data = FormData::new().with("title", "Dune");
        assert_eq!(data.get("rating"), None);
        assert!(data.get_all("rating").is_empty());
        assert!(!data.contains("rating"));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_empty_value_is_present() {
        let data = FormData::new().with("title", "");
        assert!(data.contains("title"));
        assert_eq!(data.get("title"), Some(""));
        assert!(!data.is_empty());
    }
}
