//! HTTP surface
//!
//! A thin axum layer over the store, planner, interpreter, analytics,
//! and history. Every endpoint fetches fresh data per request; the
//! dashboard stays stateless against this API.

mod config;
mod errors;
mod response;
#[allow(clippy::module_inception)]
mod server;

pub use config::ServerConfig;
pub use errors::{ApiError, ApiResult};
pub use response::{
    QueryRequest, QueryResponse, SqlRequest, SqlResponse, TableSummary, TablesResponse,
};
pub use server::{router, run_nl_query, serve, AppState};
