//! LLM request/response types for Tutor.
//!
//! The inference collaborator is modelled as `run(prompt, max_tokens,
//! temperature)`: one prompt string in, one completion string (or an error) out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Provider-assigned response ID, when the provider returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub model: String,
    #[serde(default)]
    pub usage: Usage,
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("inference timed out after {0}ms")]
    Timeout(u64),

    #[error("provider returned an empty completion")]
    EmptyCompletion,

    #[error("provider panicked: {0}")]
    Panicked(String),
}

/// Type of LLM provider backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Cloudflare Workers AI text generation (`/ai/run/{model}`).
    WorkersAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::WorkersAi => write!(f, "workers_ai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workers_ai" => Ok(ProviderKind::WorkersAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(format!("invalid provider kind: '{other}'")),
        }
    }
}

/// Configuration for the inference provider.
///
/// The API key itself is never stored here -- only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_kind")]
    pub kind: ProviderKind,
    /// Model identifier to use.
    #[serde(default = "default_model")]
    pub model: String,
    /// Override the default base URL for the provider.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Cloudflare account ID (Workers AI only).
    #[serde(default)]
    pub account_id: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_kind() -> ProviderKind {
    ProviderKind::WorkersAi
}

fn default_model() -> String {
    "@cf/meta/llama-3.1-8b-instruct".to_string()
}

fn default_api_key_env() -> String {
    "TUTOR_API_KEY".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            model: default_model(),
            base_url: None,
            account_id: None,
            api_key_env: default_api_key_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_roundtrip() {
        for kind in [ProviderKind::WorkersAi, ProviderKind::Anthropic] {
            let s = kind.to_string();
            let parsed: ProviderKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_provider_kind_serde() {
        let json = serde_json::to_string(&ProviderKind::WorkersAi).unwrap();
        assert_eq!(json, "\"workers_ai\"");
        let parsed: ProviderKind = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(parsed, ProviderKind::Anthropic);
    }

    #[test]
    fn test_provider_kind_rejects_unknown() {
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_usage_default() {
        let usage = Usage::default();
        assert_eq!(usage.input_tokens, 0);
        assert_eq!(usage.output_tokens, 0);
    }

    #[test]
    fn test_llm_error_display() {
        assert_eq!(
            LlmError::Timeout(30_000).to_string(),
            "inference timed out after 30000ms"
        );
        assert!(LlmError::Provider { message: "boom".into() }
            .to_string()
            .contains("boom"));
        assert_eq!(
            LlmError::Panicked("index out of bounds".into()).to_string(),
            "provider panicked: index out of bounds"
        );
    }

    #[test]
    fn test_provider_config_defaults_from_empty_json() {
        let config: ProviderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.kind, ProviderKind::WorkersAi);
        assert_eq!(config.api_key_env, "TUTOR_API_KEY");
        assert!(config.base_url.is_none());
    }
}
