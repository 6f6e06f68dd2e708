//! History errors

use thiserror::Error;

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors from history operations
#[derive(Debug, Clone, Error)]
pub enum HistoryError {
    /// No entry with the given ID
    #[error("History entry not found: {0}")]
    NotFound(String),

    /// The backing storage was unavailable
    #[error("History unavailable: {0}")]
    Unavailable(String),
}
