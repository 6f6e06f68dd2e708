//! Query history and saved analyses
//!
//! Only the natural-language text and selected table names of a query
//! persist; plans and results never do. History dedups by query text,
//! counting executions, and favorites survive a non-destructive clear.

mod errors;
mod history;
mod saved;

pub use errors::{HistoryError, HistoryResult};
pub use history::{HistoryEntry, QueryHistory, HISTORY_CAP};
pub use saved::{SavedAnalyses, SavedAnalysis};
