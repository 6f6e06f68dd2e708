//! Record store boundary
//!
//! The hosted record store is an external collaborator; this module
//! defines the interface the rest of the engine works against, an
//! in-memory implementation for tests and local use, and the explicit
//! change feed query surfaces subscribe to for refresh signaling.

mod change;
mod errors;
mod import;
mod memory;

use serde_json::Value;

use crate::record::StoredRecord;

pub use change::{ChangeEvent, ChangeHub, ChangeKind, ChangeReceiver};
pub use errors::{StoreError, StoreResult};
pub use import::{detect_record_type, export_json, import_rows, ImportOutcome};
pub use memory::MemoryStore;

/// Operations every record store exposes
pub trait RecordStore: Send + Sync {
    /// Distinct record types, sorted
    fn record_types(&self) -> StoreResult<Vec<String>>;

    /// All records tagged with a record type, in insertion order
    fn fetch(&self, record_type: &str) -> StoreResult<Vec<StoredRecord>>;

    /// All records across types, in insertion order
    fn fetch_all(&self) -> StoreResult<Vec<StoredRecord>>;

    /// A single record by ID
    fn get(&self, id: &str) -> StoreResult<StoredRecord>;

    /// Inserts one record; `data` must be a JSON object
    fn insert(&self, record_type: &str, data: Value) -> StoreResult<StoredRecord>;

    /// Inserts many records, returning the count stored
    fn insert_many(&self, record_type: &str, rows: Vec<Value>) -> StoreResult<usize>;

    /// Replaces a record's data and bumps its updated_at
    fn update(&self, id: &str, data: Value) -> StoreResult<StoredRecord>;

    /// Deletes a record by ID
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// The change feed for this store
    fn changes(&self) -> &ChangeHub;
}
