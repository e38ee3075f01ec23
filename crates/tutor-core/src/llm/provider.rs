//! LlmProvider trait definition.
//!
//! This is the core abstraction that all inference backends implement:
//! one prompt in, one completion (or an [`LlmError`]) out.

use tutor_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Workers AI, Anthropic, etc.).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in tutor-infra (e.g., `WorkersAiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "workers_ai", "anthropic").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
