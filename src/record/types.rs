//! Stored record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A flat field -> value mapping; the unit the interpreter operates on
pub type Row = serde_json::Map<String, Value>;

/// A record as held by the record store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Record ID
    pub id: String,
    /// Collection tag ("table" name)
    pub record_type: String,
    /// Opaque JSON fields
    pub data: Value,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Creates a new record with a fresh ID and current timestamps
    pub fn new(record_type: impl Into<String>, data: Value) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            record_type: record_type.into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the record's fields as a row, if `data` is an object
    pub fn row(&self) -> Option<&Row> {
        self.data.as_object()
    }

    /// Returns the record's field names, empty for non-object data
    pub fn field_names(&self) -> Vec<String> {
        self.row()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default()
    }
}
