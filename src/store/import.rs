//! Tabular import and export
//!
//! Imports an array of JSON rows into the store, detecting a record
//! type from well-known key patterns and the schema from the first
//! row. Exports a collection back out as pretty-printed JSON of the
//! raw row data.

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::RecordStore;

/// Result of one import
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Record type the rows were stored under
    pub record_type: String,
    /// Number of rows imported
    pub count: usize,
    /// Field names detected from the first row
    pub schema: Vec<String>,
}

/// Guesses a record type from a sample row's keys
pub fn detect_record_type(sample: &Map<String, Value>) -> &'static str {
    let keys: Vec<String> = sample.keys().map(|k| k.to_lowercase()).collect();
    let has = |key: &str| keys.iter().any(|k| k == key);

    if has("student_id") || has("gpa") {
        return "students";
    }
    if has("employee_id") || has("salary") {
        return "employees";
    }
    if has("customer_id") || has("purchase") {
        return "customers";
    }
    if has("product_id") || has("price") {
        return "products";
    }
    "records"
}

/// Imports rows under a detected (or hinted) record type
pub fn import_rows(
    store: &dyn RecordStore,
    rows: Vec<Value>,
    type_hint: Option<&str>,
) -> StoreResult<ImportOutcome> {
    let first = rows
        .first()
        .ok_or_else(|| StoreError::InvalidImport("data must be a non-empty array".into()))?;
    let sample = first
        .as_object()
        .ok_or_else(|| StoreError::InvalidImport("rows must be JSON objects".into()))?;

    let record_type = type_hint
        .map(str::to_string)
        .unwrap_or_else(|| detect_record_type(sample).to_string());
    let schema: Vec<String> = sample.keys().cloned().collect();

    let count = store.insert_many(&record_type, rows)?;

    Ok(ImportOutcome {
        record_type,
        count,
        schema,
    })
}

/// Exports a collection's row data as pretty-printed JSON
pub fn export_json(store: &dyn RecordStore, record_type: &str) -> StoreResult<String> {
    let rows: Vec<Value> = store
        .fetch(record_type)?
        .into_iter()
        .map(|r| r.data)
        .collect();
    serde_json::to_string_pretty(&rows)
        .map_err(|e| StoreError::Unavailable(format!("export failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_detects_known_shapes() {
        let sample = json!({"Student_ID": 1, "name": "Ada"});
        assert_eq!(detect_record_type(sample.as_object().unwrap()), "students");

        let sample = json!({"salary": 90000});
        assert_eq!(detect_record_type(sample.as_object().unwrap()), "employees");

        let sample = json!({"title": "untyped"});
        assert_eq!(detect_record_type(sample.as_object().unwrap()), "records");
    }

    #[test]
    fn test_import_detects_type_and_schema() {
        let store = MemoryStore::new();
        let outcome = import_rows(
            &store,
            vec![
                json!({"product_id": 1, "price": 10}),
                json!({"product_id": 2, "price": 20}),
            ],
            None,
        )
        .unwrap();

        assert_eq!(outcome.record_type, "products");
        assert_eq!(outcome.count, 2);
        assert_eq!(outcome.schema, vec!["price", "product_id"]);
        assert_eq!(store.fetch("products").unwrap().len(), 2);
    }

    #[test]
    fn test_hint_overrides_detection() {
        let store = MemoryStore::new();
        let outcome =
            import_rows(&store, vec![json!({"gpa": 3.9})], Some("transcripts")).unwrap();
        assert_eq!(outcome.record_type, "transcripts");
    }

    #[test]
    fn test_empty_import_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(
            import_rows(&store, vec![], None),
            Err(StoreError::InvalidImport(_))
        ));
    }

    #[test]
    fn test_export_round_trip() {
        let store = MemoryStore::new();
        store.insert("t", json!({"v": 1})).unwrap();
        let exported = export_json(&store, "t").unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&exported).unwrap();
        assert_eq!(parsed, vec![json!({"v": 1})]);
    }
}
