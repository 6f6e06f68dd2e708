//! HTTP planner client
//!
//! Posts the request as JSON to a configured endpoint and maps the
//! upstream failure modes onto the planner error taxonomy. A response
//! body carrying an `error` field counts as a rejection even when the
//! status is 200.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::plan::RawPlan;

use super::errors::{PlannerError, PlannerResult};
use super::request::PlannerRequest;
use super::QueryPlanner;

/// Planner backed by an HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpPlanner {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpPlanner {
    /// Creates a client for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Sets a bearer token sent with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[async_trait]
impl QueryPlanner for HttpPlanner {
    async fn plan(&self, request: &PlannerRequest) -> PlannerResult<RawPlan> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PlannerError::Unreachable(e.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(PlannerError::RateLimited),
            StatusCode::PAYMENT_REQUIRED => return Err(PlannerError::CreditsExhausted),
            status if !status.is_success() => {
                return Err(PlannerError::Unreachable(format!("status {}", status)));
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PlannerError::Malformed(e.to_string()))?;

        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(PlannerError::Rejected(message.to_string()));
        }

        serde_json::from_value(body).map_err(|e| PlannerError::Malformed(e.to_string()))
    }
}
