//! ChatService -- orchestrates one chat turn end to end.
//!
//! Every turn that passes validation is recorded exactly once: if inference
//! fails, times out, or returns nothing, the configured fallback message is
//! returned and recorded in its place. Validation failures return before any
//! session is resolved, so they never touch history.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;
use tracing::{Instrument, debug, info_span, warn};
use tutor_types::chat::{ChatReply, ChatRequest};
use tutor_types::config::ChatSettings;
use tutor_types::error::ChatError;
use tutor_types::history::{CONTEXT_WINDOW, History};
use tutor_types::llm::{CompletionRequest, LlmError};

use crate::history::store::HistoryStore;
use crate::llm::box_provider::BoxLlmProvider;
use crate::prompt::build_prompt;
use crate::session::registry::SessionRegistry;
use crate::storage::kv_store::KvStore;

const MISSING_CHAT_FIELDS: &str = "Missing userId or message";
const MISSING_USER_ID: &str = "Missing userId";

/// Chat orchestrator, generic over the KV backend that persists history.
pub struct ChatService<S: KvStore + 'static> {
    sessions: SessionRegistry<S>,
    provider: BoxLlmProvider,
    model: String,
    settings: ChatSettings,
}

impl<S: KvStore + 'static> ChatService<S> {
    pub fn new(
        store: HistoryStore<S>,
        provider: BoxLlmProvider,
        model: impl Into<String>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            sessions: SessionRegistry::new(store),
            provider,
            model: model.into(),
            settings,
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of live session actors.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Run one chat turn for `request.user_id`.
    pub async fn handle_chat(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let (user_id, message) = match (request.user_id, request.message) {
            (Some(user_id), Some(message)) if !user_id.is_empty() && !message.is_empty() => {
                (user_id, message)
            }
            _ => return Err(ChatError::InvalidRequest(MISSING_CHAT_FIELDS.to_string())),
        };

        let session = self.sessions.resolve(&user_id);
        let history = session.get_history().await?;
        let prompt = build_prompt(&message, &history.context_window());

        let response = match self.infer(prompt).await {
            Ok(content) => content,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "inference failed; using fallback reply");
                self.settings.fallback_message.clone()
            }
        };

        session.record_interaction(message, response.clone()).await?;
        debug!(user_id = %user_id, context_turns = history.len().min(CONTEXT_WINDOW), "chat turn recorded");

        Ok(ChatReply {
            response,
            session_id: user_id,
        })
    }

    /// Current history for `user_id`, oldest first.
    pub async fn get_history_for_user(&self, user_id: &str) -> Result<History, ChatError> {
        require_user_id(user_id)?;
        Ok(self.sessions.resolve(user_id).get_history().await?)
    }

    /// Replace the history for `user_id` with the empty sequence.
    pub async fn clear_history_for_user(&self, user_id: &str) -> Result<(), ChatError> {
        require_user_id(user_id)?;
        self.sessions.resolve(user_id).clear_history().await?;
        Ok(())
    }

    /// Call the provider, bounded by the configured timeout. A blank
    /// completion counts as a failure.
    async fn infer(&self, prompt: String) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };
        let timeout = self.settings.inference_timeout();

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = request.temperature,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        let call = async {
            let completion = AssertUnwindSafe(self.provider.complete(&request)).catch_unwind();
            match tokio::time::timeout(timeout, completion).await {
                Ok(Ok(Ok(response))) => {
                    let current = tracing::Span::current();
                    current.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
                    current.record("gen_ai.usage.output_tokens", response.usage.output_tokens);
                    if response.content.trim().is_empty() {
                        Err(LlmError::EmptyCompletion)
                    } else {
                        Ok(response.content)
                    }
                }
                Ok(Ok(Err(e))) => Err(e),
                Ok(Err(panic)) => Err(LlmError::Panicked(panic_message(panic.as_ref()))),
                Err(_) => Err(LlmError::Timeout(duration_millis(timeout))),
            }
        };
        call.instrument(span).await
    }
}

fn require_user_id(user_id: &str) -> Result<(), ChatError> {
    if user_id.is_empty() {
        return Err(ChatError::InvalidRequest(MISSING_USER_ID.to_string()));
    }
    Ok(())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
