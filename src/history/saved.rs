//! Saved analyses
//!
//! A saved analysis remembers just enough to re-run an analytics view:
//! the analysis type and the field or field pair it was over.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{HistoryError, HistoryResult};

/// One saved analytics view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAnalysis {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// "scatter", "distribution", or "group"
    pub analysis_type: String,
    pub field1: String,
    pub field2: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// In-memory saved-analysis list
#[derive(Debug, Default)]
pub struct SavedAnalyses {
    entries: RwLock<Vec<SavedAnalysis>>,
}

impl SavedAnalyses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves an analysis, returning its ID
    pub fn save(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        analysis_type: impl Into<String>,
        field1: impl Into<String>,
        field2: Option<String>,
    ) -> HistoryResult<String> {
        let entry = SavedAnalysis {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description,
            analysis_type: analysis_type.into(),
            field1: field1.into(),
            field2,
            created_at: Utc::now(),
        };
        let id = entry.id.clone();
        self.entries
            .write()
            .map_err(|_| HistoryError::Unavailable("saved analyses lock poisoned".into()))?
            .push(entry);
        Ok(id)
    }

    /// All saved analyses, newest first
    pub fn list(&self) -> HistoryResult<Vec<SavedAnalysis>> {
        let mut entries = self
            .entries
            .read()
            .map(|e| e.clone())
            .map_err(|_| HistoryError::Unavailable("saved analyses lock poisoned".into()))?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Deletes one saved analysis
    pub fn remove(&self, id: &str) -> HistoryResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| HistoryError::Unavailable("saved analyses lock poisoned".into()))?;
        let position = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        entries.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_list() {
        let saved = SavedAnalyses::new();
        saved
            .save("GPA vs hours", None, "scatter", "hours", Some("gpa".into()))
            .unwrap();
        let entries = saved.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].analysis_type, "scatter");
        assert_eq!(entries[0].field2.as_deref(), Some("gpa"));
    }

    #[test]
    fn test_remove() {
        let saved = SavedAnalyses::new();
        let id = saved.save("d", None, "distribution", "dept", None).unwrap();
        saved.remove(&id).unwrap();
        assert!(saved.list().unwrap().is_empty());
        assert!(matches!(saved.remove(&id), Err(HistoryError::NotFound(_))));
    }
}
