//! LLM client module
//!
//! Provides a provider-agnostic completion interface over the hosted
//! generation APIs. One request in, one response out; conversation state is
//! never kept between calls.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod openai;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
#[allow(unused_imports)]
pub use types::Role;
pub use types::{CompletionRequest, CompletionResponse, Message, StopReason, TokenUsage, ToolCall, ToolDefinition};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Supports "openai" and "anthropic" providers. Fails before any network
/// call when the configured API key environment variable is unset.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAIClient::from_config(config)?)),
        "anthropic" => Ok(Arc::new(AnthropicClient::from_config(config)?)),
        other => Err(LlmError::InvalidResponse(format!(
            "Unknown LLM provider: '{}'. Supported: openai, anthropic",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_unknown_provider() {
        let config = LlmConfig {
            provider: "izzy".to_string(),
            ..LlmConfig::default()
        };

        let err = create_client(&config).unwrap_err();
        assert!(err.to_string().contains("Unknown LLM provider"));
    }

    #[test]
    fn test_create_client_missing_key() {
        let config = LlmConfig {
            api_key_env: "UNBLOCK_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmConfig::default()
        };

        let err = create_client(&config).unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey { .. }));
    }
}
