//! Process-local `KvStore` for ephemeral runs and tests.
//!
//! Nothing survives a restart. Entries are sharded by `DashMap`, and guards
//! are never held across an await point.

use std::sync::Arc;

use dashmap::DashMap;
use tutor_core::storage::kv_store::KvStore;
use tutor_types::error::RepositoryError;

/// In-memory key-value store keyed by `(scope, key)`.
#[derive(Clone, Default)]
pub struct InMemoryKvStore {
    entries: Arc<DashMap<(String, String), serde_json::Value>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all scopes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for InMemoryKvStore {
    async fn get(
        &self,
        scope: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, RepositoryError> {
        let id = (scope.to_string(), key.to_string());
        Ok(self.entries.get(&id).map(|entry| entry.value().clone()))
    }

    async fn set(
        &self,
        scope: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        self.entries
            .insert((scope.to_string(), key.to_string()), value.clone());
        Ok(())
    }

    async fn delete(&self, scope: &str, key: &str) -> Result<(), RepositoryError> {
        self.entries.remove(&(scope.to_string(), key.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = InMemoryKvStore::new();
        assert!(store.get("alice", "history").await.unwrap().is_none());

        store.set("alice", "history", &json!([1])).await.unwrap();
        assert_eq!(store.get("alice", "history").await.unwrap(), Some(json!([1])));
        assert_eq!(store.len(), 1);

        store.delete("alice", "history").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = InMemoryKvStore::new();
        let clone = store.clone();

        clone.set("bob", "history", &json!([])).await.unwrap();
        assert!(store.get("bob", "history").await.unwrap().is_some());
    }
}
