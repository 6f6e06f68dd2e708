//! Planner errors
//!
//! One terminal error per query submission; none of these are
//! retried automatically.

use thiserror::Error;

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors from the external planner
#[derive(Debug, Clone, Error)]
pub enum PlannerError {
    /// The planner endpoint could not be reached
    #[error("AI service temporarily unavailable. Please try again. ({0})")]
    Unreachable(String),

    /// The planner throttled the request
    #[error("Rate limit exceeded. Please try again in a few moments.")]
    RateLimited,

    /// The planner account is out of credits
    #[error("AI credits exhausted. Please add credits to continue using AI queries.")]
    CreditsExhausted,

    /// The planner answered with an error of its own
    #[error("{0}")]
    Rejected(String),

    /// The planner's response was not a usable plan
    #[error("AI could not process your query. Please try rephrasing. ({0})")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert!(PlannerError::RateLimited.to_string().contains("Rate limit"));
        assert!(PlannerError::CreditsExhausted
            .to_string()
            .contains("credits"));
    }
}
