//! Result types for query interpretation

use crate::plan::SkippedStep;
use crate::record::Row;

/// Result of interpreting a plan: an ordered sequence of flat rows
/// plus diagnostics about steps that were dropped during sanitization
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// Rows in result order; always fresh, never aliasing source rows
    pub rows: Vec<Row>,
    /// Steps dropped by validation, for display alongside results
    pub skipped: Vec<SkippedStep>,
}

impl ResultSet {
    /// Creates an empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of result rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows were produced
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over result rows
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}
