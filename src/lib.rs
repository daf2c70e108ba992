//! Goal Unblocker - barrier-aware action plan generation
//!
//! A small web service that collects a user's goal and the barrier blocking
//! it, asks a hosted language model for a coaching-style plan, validates the
//! returned shape, and serves it back as JSON.
//!
//! # Core Rules
//!
//! - **One round trip**: validate, call the provider once, parse, respond.
//!   No retries, no queue, no cache.
//! - **Never half a plan**: every failure collapses to a single
//!   `{ "error": ... }` body with an appropriate status.
//! - **Varied output by design**: sampling temperature is non-zero, so
//!   identical inputs are expected to produce different steps.
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait with OpenAI and Anthropic implementations
//! - [`plan`] - ActionPlan domain types and the generation gateway
//! - [`server`] - axum router and the `/api/generate-plan` endpoint
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod llm;
pub mod plan;
pub mod server;

// Re-export commonly used types
pub use config::{Config, LlmConfig, ServerConfig};
pub use llm::{
    AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client,
};
pub use plan::{ActionPlan, PlanError, PlanGenerator, PlanRequest, Step};
pub use server::{AppState, build_router, run_serve};
