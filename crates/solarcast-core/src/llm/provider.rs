//! LlmProvider trait definition.
//!
//! This is the core abstraction that every chat-completion backend implements.

use solarcast_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Azure OpenAI, OpenAI-compatible, test doubles).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in solarcast-infra.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "azure", "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
