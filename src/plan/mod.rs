//! ActionPlan domain types and the generation gateway

mod generator;
mod types;

pub use generator::PlanGenerator;
pub use types::{ActionPlan, MAX_STEPS, MIN_STEPS, PlanRequest, Step};

use thiserror::Error;

use crate::llm::LlmError;

/// Errors that can occur while producing an action plan
///
/// Each variant maps to one branch of the error taxonomy: invalid input is
/// the caller's to fix, a missing credential is a setup problem (carried by
/// [`LlmError::MissingApiKey`]), provider failures surface the provider's own
/// message, and format failures hide the malformed payload from the caller.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("The model returned a plan that could not be used. Please try again.")]
    Format { reason: String },
}

impl PlanError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        PlanError::Format { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_hides_reason() {
        let err = PlanError::format("steps was a string, not an array");
        let msg = err.to_string();
        assert!(!msg.contains("steps was a string"));
        assert!(msg.contains("could not be used"));
    }

    #[test]
    fn test_llm_error_passes_through() {
        let err = PlanError::from(LlmError::ApiError {
            status: 429,
            message: "Rate limit reached".to_string(),
        });
        assert!(err.to_string().contains("Rate limit reached"));
    }
}
