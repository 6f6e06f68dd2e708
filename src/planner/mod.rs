//! Structured query planner boundary
//!
//! The planner is an external text-to-operations service: it receives
//! a natural-language query plus schema and sample metadata and
//! returns a structured plan. Nothing in its response is trusted; the
//! plan module re-validates every field before execution.

mod errors;
mod http;
mod request;

use async_trait::async_trait;

use crate::plan::RawPlan;

pub use errors::{PlannerError, PlannerResult};
pub use http::HttpPlanner;
pub use request::{PlannerRequest, Relationship, SAMPLE_ROWS};

/// Translates natural-language queries into raw plans
#[async_trait]
pub trait QueryPlanner: Send + Sync {
    /// Plans one query submission. Upstream failures surface as a
    /// single terminal error; the interpreter is never invoked on
    /// a failed submission.
    async fn plan(&self, request: &PlannerRequest) -> PlannerResult<RawPlan>;
}

/// Placeholder used when no planner endpoint is configured
#[derive(Debug, Default)]
pub struct UnconfiguredPlanner;

#[async_trait]
impl QueryPlanner for UnconfiguredPlanner {
    async fn plan(&self, _request: &PlannerRequest) -> PlannerResult<RawPlan> {
        Err(PlannerError::Unreachable(
            "no planner endpoint configured".into(),
        ))
    }
}
