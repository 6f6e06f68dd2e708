//! Query operation interpreter
//!
//! Deterministically transforms source collections plus a sanitized
//! plan into a result collection. Execution flow (strict order):
//! 1. Seed rows from a fresh copy of the anchor collection
//! 2. Left-merge each join in order (first match wins, exact equality)
//! 3. Apply operations strictly in plan order, with groupby/aggregate
//!    fusion and standalone-aggregate suppression
//! 4. Return the result set (never an error; bad steps degrade to
//!    skip, pass-through, or a safe default)
//!
//! The interpreter performs no I/O, never mutates its inputs, and
//! never panics on malformed data.

pub mod coerce;
mod filter;
mod group;
mod join;
mod pipeline;
mod result;
mod sort;

pub use filter::RowFilter;
pub use pipeline::Interpreter;
pub use result::ResultSet;
pub use sort::{RowSorter, SortDirection};
