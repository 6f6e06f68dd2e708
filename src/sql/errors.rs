//! Pseudo-SQL errors

use thiserror::Error;

/// Result type for SQL operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors from parsing or executing pseudo-SQL
#[derive(Debug, Clone, Error)]
pub enum SqlError {
    /// Statement did not start with an allowed verb
    #[error("Only SELECT, INSERT, UPDATE, DELETE operations are allowed")]
    UnsupportedOperation,

    /// Statement contained a schema-changing verb
    #[error("This query contains potentially dangerous operations")]
    DangerousPattern,

    /// Statement was syntactically unusable
    #[error("Invalid {0} syntax")]
    InvalidSyntax(&'static str),

    /// UPDATE/DELETE without an ID guard
    #[error("{0} requires WHERE id = '<id>' clause for safety")]
    MissingIdClause(&'static str),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}
