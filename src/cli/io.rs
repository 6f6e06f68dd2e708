//! Data file I/O
//!
//! The CLI backs the in-memory store with a plain JSON file: an array
//! of stored records. A missing file means an empty store.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::record::StoredRecord;
use crate::store::MemoryStore;

use super::errors::{CliError, CliResult};

/// Loads the store from a data file; a missing file yields an empty
/// store
pub fn load_store(path: &Path) -> CliResult<MemoryStore> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let contents = fs::read_to_string(path)?;
    let records: Vec<StoredRecord> = serde_json::from_str(&contents)?;
    Ok(MemoryStore::with_records(records))
}

/// Writes the store's snapshot back to the data file
pub fn save_store(path: &Path, store: &MemoryStore) -> CliResult<()> {
    let snapshot = store.snapshot()?;
    let contents = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Reads an import file: a JSON array of objects, or a single object
/// which becomes a one-row import
pub fn read_rows(path: &Path) -> CliResult<Vec<Value>> {
    let contents = fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&contents)?;
    match parsed {
        Value::Array(rows) => Ok(rows),
        Value::Object(_) => Ok(vec![parsed]),
        _ => Err(CliError::InvalidInput(
            "import file must contain a JSON array of objects".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;
    use serde_json::json;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_store(&dir.path().join("absent.json")).unwrap();
        assert!(store.record_types().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let store = MemoryStore::new();
        store.insert("students", json!({"name": "Ada"})).unwrap();
        save_store(&path, &store).unwrap();

        let restored = load_store(&path).unwrap();
        let records = restored.fetch("students").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, json!({"name": "Ada"}));
    }

    #[test]
    fn test_read_rows_accepts_array_or_object() {
        let dir = tempfile::tempdir().unwrap();

        let array_path = dir.path().join("rows.json");
        fs::write(&array_path, r#"[{"a": 1}, {"a": 2}]"#).unwrap();
        assert_eq!(read_rows(&array_path).unwrap().len(), 2);

        let object_path = dir.path().join("row.json");
        fs::write(&object_path, r#"{"a": 1}"#).unwrap();
        assert_eq!(read_rows(&object_path).unwrap().len(), 1);

        let scalar_path = dir.path().join("bad.json");
        fs::write(&scalar_path, "42").unwrap();
        assert!(read_rows(&scalar_path).is_err());
    }
}
