//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API key. Set the {env} environment variable.")]
    MissingApiKey { env: String },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this is a configuration problem rather than a provider one
    pub fn is_config(&self) -> bool {
        matches!(self, LlmError::MissingApiKey { .. })
    }
}

/// Best-effort extraction of the provider's own error message
///
/// Both providers wrap failures in `{"error": {"message": ...}}`.
/// Falls back to the raw body, then to a bare status line.
pub(crate) fn extract_api_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value["error"]["message"].as_str()
    {
        return message.to_string();
    }

    if body.trim().is_empty() {
        format!("provider returned HTTP {status}")
    } else {
        body.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_config() {
        let err = LlmError::MissingApiKey {
            env: "OPENAI_API_KEY".to_string(),
        };
        assert!(err.is_config());

        let err = LlmError::ApiError {
            status: 500,
            message: "Server error".to_string(),
        };
        assert!(!err.is_config());
    }

    #[test]
    fn test_missing_api_key_message_names_env_var() {
        let err = LlmError::MissingApiKey {
            env: "OPENAI_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_extract_api_message_envelope() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(extract_api_message(401, body), "Incorrect API key provided");
    }

    #[test]
    fn test_extract_api_message_raw_body() {
        assert_eq!(extract_api_message(502, "Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_extract_api_message_empty_body() {
        assert_eq!(extract_api_message(503, "  "), "provider returned HTTP 503");
    }
}
