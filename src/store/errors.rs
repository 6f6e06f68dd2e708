//! Record store errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from record store operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No record with the given ID
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Record data was not a JSON object
    #[error("Record data must be a JSON object")]
    NotAnObject,

    /// Import input was unusable
    #[error("Invalid import data: {0}")]
    InvalidImport(String),

    /// The backing store was unavailable or corrupt
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
