//! Workers AI request/response bodies.

use serde::{Deserialize, Serialize};

/// Request body for a text-generation model.
#[derive(Debug, Clone, Serialize)]
pub struct RunRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Response envelope shared by the Cloudflare v4 API.
#[derive(Debug, Clone, Deserialize)]
pub struct RunEnvelope {
    #[serde(default)]
    pub success: bool,
    pub result: Option<RunResult>,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunResult {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub usage: Option<RunUsage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parses_success() {
        let body = r#"{"result":{"response":"hi","usage":{"prompt_tokens":3,"completion_tokens":1}},"success":true,"errors":[],"messages":[]}"#;
        let envelope: RunEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.success);
        let result = envelope.result.unwrap();
        assert_eq!(result.response.as_deref(), Some("hi"));
        assert_eq!(result.usage.unwrap().completion_tokens, 1);
    }

    #[test]
    fn test_envelope_parses_failure() {
        let body = r#"{"result":null,"success":false,"errors":[{"code":5007,"message":"No such model"}]}"#;
        let envelope: RunEnvelope = serde_json::from_str(body).unwrap();
        assert!(!envelope.success);
        assert!(envelope.result.is_none());
        assert_eq!(envelope.errors[0].message, "No such model");
    }
}
