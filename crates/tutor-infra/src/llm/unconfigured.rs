//! Stand-in provider used when no inference backend could be configured.
//!
//! Every completion fails, so chat turns degrade to the fallback reply while
//! history reads and clears keep working.

use tutor_core::llm::provider::LlmProvider;
use tutor_types::llm::{CompletionRequest, CompletionResponse, LlmError};

pub struct UnconfiguredProvider {
    reason: String,
}

impl UnconfiguredProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl LlmProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::Provider {
            message: format!("no inference provider configured: {}", self.reason),
        })
    }
}
