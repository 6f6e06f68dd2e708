//! Observability for querydeck
//!
//! Structured JSON logging and query timing. Logs are synchronous, one
//! line per event, with deterministic key ordering so log output can be
//! diffed across runs.

mod logger;
mod timer;

pub use logger::{Logger, Severity};
pub use timer::QueryTimer;
