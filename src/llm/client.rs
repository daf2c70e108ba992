//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// This is the seam between the plan generator and the hosted providers.
/// No conversation state is maintained between calls; a plan request is a
/// single completion.
#[async_trait]
pub trait LlmClient: Send + Sync + std::fmt::Debug {
    /// Send a single completion request (suspends until complete or failed)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
