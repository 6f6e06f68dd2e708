//! Hand-typed pseudo-SQL surface
//!
//! Accepts the small SQL dialect users type into the dashboard's SQL
//! box. Only SELECT/INSERT/UPDATE/DELETE are admitted, schema-changing
//! verbs are rejected outright, and UPDATE/DELETE must name a record
//! ID. SELECTs run through the interpreter's sort/limit machinery.

mod errors;
mod exec;
mod statement;

pub use errors::{SqlError, SqlResult};
pub use exec::{execute, SqlOutcome};
pub use statement::{OrderBy, SelectStatement, SqlStatement, DEFAULT_LIMIT};
