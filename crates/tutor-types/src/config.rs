//! Global configuration types for Tutor.
//!
//! `TutorConfig` represents the top-level `config.toml` that controls the
//! server address, chat-turn constants, the inference provider, and logging.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::ProviderConfig;

/// Top-level configuration for Tutor.
///
/// Loaded from `~/.tutor/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Constants applied to every chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Upper bound on generated tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature passed to the provider.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Seconds to wait for the provider before falling back.
    #[serde(default = "default_inference_timeout_secs")]
    pub inference_timeout_secs: u64,

    /// Reply recorded and returned when inference fails or times out.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f64 {
    0.7
}

fn default_inference_timeout_secs() -> u64 {
    30
}

/// Apology returned in place of a model reply.
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "I'm sorry, I'm having trouble answering right now. Please try asking again in a moment.";

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

impl ChatSettings {
    /// Inference timeout as a [`Duration`], never shorter than one second.
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs.max(1))
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            inference_timeout_secs: default_inference_timeout_secs(),
            fallback_message: default_fallback_message(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// Bridge spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ProviderKind;

    #[test]
    fn test_config_default_values() {
        let config = TutorConfig::default();
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.chat.max_tokens, 1024);
        assert!((config.chat.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.chat.fallback_message, DEFAULT_FALLBACK_MESSAGE);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: TutorConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.chat.inference_timeout_secs, 30);
        assert_eq!(config.provider.kind, ProviderKind::WorkersAi);
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
[server]
port = 9000

[chat]
max_tokens = 512
temperature = 0.2
inference_timeout_secs = 10

[provider]
kind = "anthropic"
model = "claude-sonnet-4-20250514"
api_key_env = "ANTHROPIC_API_KEY"

[logging]
format = "json"
otel = true
"#;
        let config: TutorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.chat.max_tokens, 512);
        assert_eq!(config.chat.fallback_message, DEFAULT_FALLBACK_MESSAGE);
        assert_eq!(config.provider.kind, ProviderKind::Anthropic);
        assert_eq!(config.provider.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.logging.otel);
    }

    #[test]
    fn test_inference_timeout_floor() {
        let settings = ChatSettings {
            inference_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(settings.inference_timeout(), Duration::from_secs(1));
    }
}
