//! Shared test doubles for the storage and LLM ports.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tutor_types::error::RepositoryError;
use tutor_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

use crate::llm::provider::LlmProvider;
use crate::storage::kv_store::KvStore;

/// In-memory KV store that yields between every operation, so unserialized
/// read-modify-write sequences would interleave and lose updates.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<HashMap<(String, String), serde_json::Value>>>,
}

impl KvStore for MemoryKvStore {
    fn get(
        &self,
        scope: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send {
        let entries = Arc::clone(&self.entries);
        let id = (scope.to_string(), key.to_string());
        async move {
            tokio::task::yield_now().await;
            Ok(entries.lock().unwrap().get(&id).cloned())
        }
    }

    fn set(
        &self,
        scope: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let entries = Arc::clone(&self.entries);
        let id = (scope.to_string(), key.to_string());
        let value = value.clone();
        async move {
            tokio::task::yield_now().await;
            entries.lock().unwrap().insert(id, value);
            Ok(())
        }
    }

    fn delete(
        &self,
        scope: &str,
        key: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        let entries = Arc::clone(&self.entries);
        let id = (scope.to_string(), key.to_string());
        async move {
            tokio::task::yield_now().await;
            entries.lock().unwrap().remove(&id);
            Ok(())
        }
    }
}

/// KV store whose every operation fails.
pub struct FailingKvStore;

impl KvStore for FailingKvStore {
    fn get(
        &self,
        _scope: &str,
        _key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send {
        async { Err(RepositoryError::Connection) }
    }

    fn set(
        &self,
        _scope: &str,
        _key: &str,
        _value: &serde_json::Value,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        async { Err(RepositoryError::Connection) }
    }

    fn delete(
        &self,
        _scope: &str,
        _key: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        async { Err(RepositoryError::Connection) }
    }
}

#[derive(Clone)]
pub enum MockBehavior {
    Reply(String),
    Fail,
    Hang(Duration),
    Panic,
}

/// Provider double that records every prompt it receives.
#[derive(Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn replying(text: &str) -> Self {
        Self::with(MockBehavior::Reply(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::with(MockBehavior::Fail)
    }

    pub fn hanging(delay: Duration) -> Self {
        Self::with(MockBehavior::Hang(delay))
    }

    pub fn panicking() -> Self {
        Self::with(MockBehavior::Panic)
    }

    fn with(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        let behavior = self.behavior.clone();
        let model = request.model.clone();
        async move {
            match behavior {
                MockBehavior::Reply(content) => Ok(CompletionResponse {
                    id: None,
                    content,
                    model,
                    usage: Usage::default(),
                }),
                MockBehavior::Fail => Err(LlmError::Provider {
                    message: "mock failure".to_string(),
                }),
                MockBehavior::Hang(delay) => {
                    tokio::time::sleep(delay).await;
                    Err(LlmError::Provider {
                        message: "mock provider should have timed out".to_string(),
                    })
                }
                MockBehavior::Panic => panic!("mock provider panicked"),
            }
        }
    }
}
