//! Cloudflare Workers AI text-generation provider.
//!
//! [`WorkersAiProvider`] implements the
//! [`LlmProvider`](tutor_core::llm::provider::LlmProvider) trait over the
//! `/ai/run/{model}` REST endpoint.

pub mod client;
pub mod types;

pub use client::WorkersAiProvider;
