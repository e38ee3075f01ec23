//! LLM provider implementations.
//!
//! Concrete [`LlmProvider`](tutor_core::llm::provider::LlmProvider)s for
//! Cloudflare Workers AI and the Anthropic Messages API, plus a factory
//! ([`create_provider`]) that picks one from a [`ProviderConfig`].

pub mod anthropic;
pub mod unconfigured;
pub mod workers_ai;

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use secrecy::SecretString;

use tutor_core::llm::box_provider::BoxLlmProvider;
use tutor_types::llm::{LlmError, ProviderConfig, ProviderKind};

use self::anthropic::AnthropicProvider;
use self::unconfigured::UnconfiguredProvider;
use self::workers_ai::WorkersAiProvider;

/// Transport-level timeout. The chat orchestrator applies its own, shorter
/// deadline on top of this.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Create a [`BoxLlmProvider`] from a [`ProviderConfig`].
///
/// The API key is read from the environment variable named by
/// `config.api_key_env`. Workers AI additionally needs `account_id`.
pub fn create_provider(config: &ProviderConfig) -> Result<BoxLlmProvider, LlmError> {
    let api_key = read_api_key(&config.api_key_env)?;

    match config.kind {
        ProviderKind::WorkersAi => {
            let account_id = config.account_id.clone().ok_or_else(|| LlmError::Provider {
                message: "provider.account_id is required for workers_ai".to_string(),
            })?;
            let mut provider = WorkersAiProvider::new(api_key, account_id)?;
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderKind::Anthropic => {
            let mut provider = AnthropicProvider::new(api_key)?;
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(BoxLlmProvider::new(provider))
        }
    }
}

/// Like [`create_provider`], but falls back to an [`UnconfiguredProvider`]
/// (logging why) so the service still starts and answers with the fallback
/// reply.
pub fn create_provider_or_unconfigured(config: &ProviderConfig) -> BoxLlmProvider {
    match create_provider(config) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::warn!(provider = %config.kind, error = %e, "inference provider unavailable; replies will use the fallback message");
            BoxLlmProvider::new(UnconfiguredProvider::new(e.to_string()))
        }
    }
}

fn read_api_key(env_var: &str) -> Result<SecretString, LlmError> {
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
        _ => {
            tracing::warn!(env_var, "API key environment variable is not set");
            Err(LlmError::AuthenticationFailed)
        }
    }
}

pub(crate) fn http_client() -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| LlmError::Provider {
            message: format!("failed to create HTTP client: {e}"),
        })
}

/// Map a non-success HTTP status to an [`LlmError`].
pub(crate) fn error_for_status(status: StatusCode, headers: &HeaderMap, body: String) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited {
            retry_after_ms: retry_after_ms(headers),
        },
        503 | 529 => LlmError::Overloaded(body),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}

fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}
