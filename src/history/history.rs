//! Query history

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{HistoryError, HistoryResult};

/// Maximum entries returned by a listing
pub const HISTORY_CAP: usize = 50;

/// One remembered query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// The natural-language text as typed
    pub query_text: String,
    /// Tables selected when the query ran
    pub selected_tables: Vec<String>,
    pub is_favorite: bool,
    pub execution_count: u32,
    pub last_executed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// In-memory query history
#[derive(Debug, Default)]
pub struct QueryHistory {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl QueryHistory {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an execution. An entry with the same query text is
    /// updated in place (count, timestamp, tables); otherwise a new
    /// entry is created.
    pub fn record(&self, query_text: &str, selected_tables: &[String]) -> HistoryResult<()> {
        let mut entries = self.write()?;
        let now = Utc::now();

        if let Some(existing) = entries.iter_mut().find(|e| e.query_text == query_text) {
            existing.execution_count += 1;
            existing.last_executed_at = now;
            existing.selected_tables = selected_tables.to_vec();
            return Ok(());
        }

        entries.push(HistoryEntry {
            id: Uuid::new_v4().to_string(),
            query_text: query_text.to_string(),
            selected_tables: selected_tables.to_vec(),
            is_favorite: false,
            execution_count: 1,
            last_executed_at: now,
            created_at: now,
        });
        Ok(())
    }

    /// Entries ordered most-recently-executed first, capped
    pub fn list(&self) -> HistoryResult<Vec<HistoryEntry>> {
        let mut entries = self.read()?;
        entries.sort_by(|a, b| b.last_executed_at.cmp(&a.last_executed_at));
        entries.truncate(HISTORY_CAP);
        Ok(entries)
    }

    /// Favorite entries, most recent first
    pub fn favorites(&self) -> HistoryResult<Vec<HistoryEntry>> {
        Ok(self.list()?.into_iter().filter(|e| e.is_favorite).collect())
    }

    /// Flips an entry's favorite flag, returning the new state
    pub fn toggle_favorite(&self, id: &str) -> HistoryResult<bool> {
        let mut entries = self.write()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        entry.is_favorite = !entry.is_favorite;
        Ok(entry.is_favorite)
    }

    /// Deletes one entry
    pub fn remove(&self, id: &str) -> HistoryResult<()> {
        let mut entries = self.write()?;
        let position = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        entries.remove(position);
        Ok(())
    }

    /// Clears history; with `keep_favorites`, favorites survive
    pub fn clear(&self, keep_favorites: bool) -> HistoryResult<()> {
        let mut entries = self.write()?;
        if keep_favorites {
            entries.retain(|e| e.is_favorite);
        } else {
            entries.clear();
        }
        Ok(())
    }

    fn read(&self) -> HistoryResult<Vec<HistoryEntry>> {
        self.entries
            .read()
            .map(|e| e.clone())
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".into()))
    }

    fn write(&self) -> HistoryResult<std::sync::RwLockWriteGuard<'_, Vec<HistoryEntry>>> {
        self.entries
            .write()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".into()))
    }
}
