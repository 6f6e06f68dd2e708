//! Source collections for a query
//!
//! A `SourceSet` holds the already-fetched collections a query runs
//! over, in the order the caller requested them. The first collection
//! is the join anchor. The `FieldProbe` is the lightweight existence
//! check used during plan sanitization: a field is considered known if
//! it occurs in the *first* record of at least one collection.

use std::collections::HashSet;

use serde_json::Value;

use super::types::{Row, StoredRecord};

/// Ordered, named record collections scoped to one query
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    tables: Vec<(String, Vec<Row>)>,
}

impl SourceSet {
    /// Creates an empty source set
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds a collection of rows under a table name
    pub fn push_rows(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables.push((name.into(), rows));
    }

    /// Adds a collection of stored records, keeping only object-shaped data
    pub fn push_records(&mut self, name: impl Into<String>, records: &[StoredRecord]) {
        let rows = records
            .iter()
            .filter_map(|r| r.data.as_object().cloned())
            .collect();
        self.tables.push((name.into(), rows));
    }

    /// Returns the table names in request order
    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns true if no collections were supplied
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Rows of the anchor (first requested) collection, or empty
    pub fn anchor_rows(&self) -> &[Row] {
        self.tables.first().map(|(_, r)| r.as_slice()).unwrap_or(&[])
    }

    /// Rows of a named collection, or empty when the name is unknown
    pub fn rows_for(&self, name: &str) -> &[Row] {
        self.tables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.as_slice())
            .unwrap_or(&[])
    }

    /// First sampled row per collection, used by the field probe
    pub fn first_rows(&self) -> impl Iterator<Item = &Row> {
        self.tables.iter().filter_map(|(_, rows)| rows.first())
    }
}

/// Field-existence probe over the first sampled record per collection
#[derive(Debug, Clone, Default)]
pub struct FieldProbe {
    known: HashSet<String>,
}

impl FieldProbe {
    /// Builds the probe from a source set
    pub fn from_source(source: &SourceSet) -> Self {
        let mut known = HashSet::new();
        for row in source.first_rows() {
            for key in row.keys() {
                known.insert(key.clone());
            }
        }
        Self { known }
    }

    /// Returns true if the field occurs in the first record of at
    /// least one supplied collection
    pub fn contains(&self, field: &str) -> bool {
        self.known.contains(field)
    }
}

/// Convenience: a single row from field/value pairs
pub fn row_of(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_source() -> SourceSet {
        let mut source = SourceSet::new();
        source.push_rows(
            "students",
            vec![
                row_of(&[("name", json!("Alice")), ("gpa", json!(3.8))]),
                row_of(&[("name", json!("Bob")), ("year", json!(2))]),
            ],
        );
        source.push_rows("courses", vec![row_of(&[("code", json!("CS101"))])]);
        source
    }

    #[test]
    fn test_anchor_is_first_requested_table() {
        let source = sample_source();
        assert_eq!(source.names(), vec!["students", "courses"]);
        assert_eq!(source.anchor_rows().len(), 2);
    }

    #[test]
    fn test_unknown_table_yields_empty_rows() {
        let source = sample_source();
        assert!(source.rows_for("missing").is_empty());
    }

    #[test]
    fn test_probe_uses_only_first_record() {
        let source = sample_source();
        let probe = FieldProbe::from_source(&source);
        assert!(probe.contains("name"));
        assert!(probe.contains("gpa"));
        assert!(probe.contains("code"));
        // "year" appears only in the second student record
        assert!(!probe.contains("year"));
    }

    #[test]
    fn test_push_records_drops_non_object_data() {
        let records = vec![
            StoredRecord::new("t", json!({"a": 1})),
            StoredRecord::new("t", json!("scalar")),
        ];
        let mut source = SourceSet::new();
        source.push_records("t", &records);
        assert_eq!(source.rows_for("t").len(), 1);
    }
}
