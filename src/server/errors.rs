//! API error mapping
//!
//! Collapses the module error taxonomies onto HTTP statuses. Planner
//! throttling and credit exhaustion keep their upstream status codes
//! so the dashboard can show the right message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::history::HistoryError;
use crate::planner::PlannerError;
use crate::sql::SqlError;
use crate::store::StoreError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Sql(#[from] SqlError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(_) => StatusCode::BAD_REQUEST,

            ApiError::Planner(PlannerError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Planner(PlannerError::CreditsExhausted) => StatusCode::PAYMENT_REQUIRED,
            ApiError::Planner(_) => StatusCode::BAD_GATEWAY,

            ApiError::Sql(SqlError::Store(StoreError::NotFound(_))) => StatusCode::NOT_FOUND,
            ApiError::Sql(_) => StatusCode::BAD_REQUEST,

            ApiError::History(HistoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::History(_) => StatusCode::INTERNAL_SERVER_ERROR,

            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
