//! The database row fetched for a job.

use std::collections::BTreeMap;

/// A single fetched row: column name to value, `None` standing for SQL NULL.
///
/// Iteration order is an artifact of the backing map. Consumers (the encoder,
/// the index server) must not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, Option<String>>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing any previous value for that column.
    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.fields.insert(column.into(), value);
    }

    /// Builder-style variant of [`Record::insert`] for non-null values.
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, Some(value.into()));
        self
    }

    /// Look up a column. The outer `Option` is column presence, the inner one nullness.
    pub fn get(&self, column: &str) -> Option<Option<&str>> {
        self.fields.get(column).map(|v| v.as_deref())
    }

    /// Iterate over `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, Option<String>)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_distinguishes_null_from_absent() {
        let mut record = Record::new();
        record.insert("title", None);

        assert_eq!(record.get("title"), Some(None));
        assert_eq!(record.get("sku"), None);
    }

    #[test]
    fn test_insert_replaces_existing_value() {
        let record = Record::new().with_field("sku", "A1").with_field("sku", "B2");

        assert_eq!(record.len(), 1);
        assert_eq!(record.get("sku"), Some(Some("B2")));
    }

    #[test]
    fn test_from_iterator() {
        let record: Record = vec![
            ("sku", Some("A1".to_string())),
            ("title", Some("Widget".to_string())),
            ("notes", None),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("notes"), Some(None));
    }
}
