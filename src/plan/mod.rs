//! Untrusted query plans
//!
//! A plan arrives from the external planner (or the pseudo-SQL parser)
//! and is trusted for nothing: every step is re-validated against the
//! recognized operation and condition sets and against sampled record
//! fields before the interpreter sees it. Invalid steps are dropped
//! with a diagnostic; a malformed plan never aborts the query.

mod op;
mod raw;
mod sanitize;

pub use op::{Condition, JoinSpec, Operation, OperationKind};
pub use raw::{RawJoin, RawOperation, RawPlan};
pub use sanitize::{sanitize_plan, truncate_value, SanitizedPlan, SkippedStep, MAX_VALUE_LEN};
