//! WorkersAiProvider -- [`LlmProvider`] for Cloudflare Workers AI.
//!
//! The API token is held as a [`SecretString`] and only exposed when
//! building the `Authorization` header.

use secrecy::{ExposeSecret, SecretString};

use tutor_core::llm::provider::LlmProvider;
use tutor_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use super::types::{RunEnvelope, RunRequest};
use crate::llm::{error_for_status, http_client};

/// Cloudflare Workers AI provider.
pub struct WorkersAiProvider {
    client: reqwest::Client,
    api_token: SecretString,
    account_id: String,
    base_url: String,
}

impl WorkersAiProvider {
    const DEFAULT_BASE_URL: &'static str = "https://api.cloudflare.com";

    pub fn new(api_token: SecretString, account_id: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client()?,
            api_token,
            account_id,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, model: &str) -> String {
        format!(
            "{}/client/v4/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, model
        )
    }
}

impl LlmProvider for WorkersAiProvider {
    fn name(&self) -> &str {
        "workers_ai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = RunRequest {
            prompt: request.prompt.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.url(&request.model))
            .bearer_auth(self.api_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let error_body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &headers, error_body));
        }

        let envelope: RunEnvelope = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        if !envelope.success {
            let message = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(LlmError::Provider { message });
        }

        let result = envelope.result.ok_or(LlmError::EmptyCompletion)?;
        let content = result.response.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(LlmError::EmptyCompletion);
        }
        let usage = result.usage.unwrap_or_default();

        Ok(CompletionResponse {
            id: None,
            content,
            model: request.model.clone(),
            usage: Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: MODEL.to_string(),
            prompt: "What is a stack?".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    fn provider(server: &MockServer) -> WorkersAiProvider {
        WorkersAiProvider::new(SecretString::from("test-token"), "acct".to_string())
            .unwrap()
            .with_base_url(server.uri())
    }

    #[test]
    fn test_url_layout() {
        let provider = WorkersAiProvider::new(SecretString::from("t"), "acct".to_string()).unwrap();
        assert_eq!(
            provider.url(MODEL),
            "https://api.cloudflare.com/client/v4/accounts/acct/ai/run/@cf/meta/llama-3.1-8b-instruct"
        );
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/client/v4/accounts/acct/ai/run/{MODEL}")))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({
                "prompt": "What is a stack?",
                "max_tokens": 1024,
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"response": "A LIFO structure."},
                "success": true,
                "errors": []
            })))
            .mount(&server)
            .await;

        let response = provider(&server).complete(&request()).await.unwrap();
        assert_eq!(response.content, "A LIFO structure.");
        assert_eq!(response.model, MODEL);
    }

    #[tokio::test]
    async fn test_complete_blank_response_is_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"response": ""},
                "success": true
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_complete_maps_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_complete_reports_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": null,
                "success": false,
                "errors": [{"code": 5007, "message": "No such model"}]
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Provider { ref message } if message == "No such model"));
    }
}
