//! In-memory record store
//!
//! The reference implementation used by tests, the CLI, and local
//! serving. Records live in insertion order behind a read-write lock;
//! every mutation publishes to the change feed.

use std::collections::BTreeSet;
use std::sync::RwLock;

use chrono::Utc;
use serde_json::Value;

use crate::record::StoredRecord;

use super::change::{ChangeEvent, ChangeHub, ChangeKind};
use super::errors::{StoreError, StoreResult};
use super::RecordStore;

/// Records held in memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StoredRecord>>,
    changes: ChangeHub,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing records
    pub fn with_records(records: Vec<StoredRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            changes: ChangeHub::new(),
        }
    }

    /// Snapshot of every record, for persistence
    pub fn snapshot(&self) -> StoreResult<Vec<StoredRecord>> {
        self.read()
    }

    fn read(&self) -> StoreResult<Vec<StoredRecord>> {
        self.records
            .read()
            .map(|records| records.clone())
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }

    fn publish(&self, record_type: &str, kind: ChangeKind, count: usize) {
        self.changes.publish(&ChangeEvent {
            record_type: record_type.to_string(),
            kind,
            count,
        });
    }
}

impl RecordStore for MemoryStore {
    fn record_types(&self) -> StoreResult<Vec<String>> {
        let records = self.read()?;
        let types: BTreeSet<String> = records.into_iter().map(|r| r.record_type).collect();
        Ok(types.into_iter().collect())
    }

    fn fetch(&self, record_type: &str) -> StoreResult<Vec<StoredRecord>> {
        let records = self.read()?;
        Ok(records
            .into_iter()
            .filter(|r| r.record_type == record_type)
            .collect())
    }

    fn fetch_all(&self) -> StoreResult<Vec<StoredRecord>> {
        self.read()
    }

    fn get(&self, id: &str) -> StoreResult<StoredRecord> {
        let records = self.read()?;
        records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn insert(&self, record_type: &str, data: Value) -> StoreResult<StoredRecord> {
        if !data.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let record = StoredRecord::new(record_type, data);
        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;
            records.push(record.clone());
        }
        self.publish(record_type, ChangeKind::Inserted, 1);
        Ok(record)
    }

    fn insert_many(&self, record_type: &str, rows: Vec<Value>) -> StoreResult<usize> {
        if rows.iter().any(|row| !row.is_object()) {
            return Err(StoreError::NotAnObject);
        }
        let count = rows.len();
        {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;
            for data in rows {
                records.push(StoredRecord::new(record_type, data));
            }
        }
        self.publish(record_type, ChangeKind::Imported, count);
        Ok(count)
    }

    fn update(&self, id: &str, data: Value) -> StoreResult<StoredRecord> {
        if !data.is_object() {
            return Err(StoreError::NotAnObject);
        }
        let updated = {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            record.data = data;
            record.updated_at = Utc::now();
            record.clone()
        };
        self.publish(&updated.record_type, ChangeKind::Updated, 1);
        Ok(updated)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let record_type = {
            let mut records = self
                .records
                .write()
                .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;
            let position = records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            records.remove(position).record_type
        };
        self.publish(&record_type, ChangeKind::Deleted, 1);
        Ok(())
    }

    fn changes(&self) -> &ChangeHub {
        &self.changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_fetch_by_type() {
        let store = MemoryStore::new();
        store.insert("students", json!({"name": "Ada"})).unwrap();
        store.insert("courses", json!({"code": "CS101"})).unwrap();

        let students = store.fetch("students").unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(store.record_types().unwrap(), vec!["courses", "students"]);
    }

    #[test]
    fn test_insert_rejects_non_object() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.insert("t", json!([1, 2])),
            Err(StoreError::NotAnObject)
        ));
    }

    #[test]
    fn test_update_bumps_timestamp() {
        let store = MemoryStore::new();
        let record = store.insert("t", json!({"v": 1})).unwrap();
        let updated = store.update(&record.id, json!({"v": 2})).unwrap();
        assert_eq!(updated.data, json!({"v": 2}));
        assert!(updated.updated_at >= record.updated_at);
    }

    #[test]
    fn test_delete_unknown_id() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete("nope"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_mutations_publish_changes() {
        let store = MemoryStore::new();
        let mut rx = store.changes().subscribe("test");

        let record = store.insert("students", json!({"name": "Ada"})).unwrap();
        store.update(&record.id, json!({"name": "Ada L"})).unwrap();
        store.delete(&record.id).unwrap();

        assert_eq!(rx.try_recv().unwrap().kind, ChangeKind::Inserted);
        assert_eq!(rx.try_recv().unwrap().kind, ChangeKind::Updated);
        assert_eq!(rx.try_recv().unwrap().kind, ChangeKind::Deleted);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = MemoryStore::new();
        store.insert("t", json!({"v": 1})).unwrap();
        let snapshot = store.snapshot().unwrap();

        let restored = MemoryStore::with_records(snapshot);
        assert_eq!(restored.fetch("t").unwrap().len(), 1);
    }
}
