//! HistoryStore -- the bounded append log for one session key, persisted
//! through a [`KvStore`].
//!
//! The whole history for a key lives in a single KV entry, so every
//! `append` and `clear` is one write: it either lands completely or not at
//! all. Callers must route all access for a key through its session actor;
//! the store itself does no locking.

use tracing::debug;
use tutor_types::error::RepositoryError;
use tutor_types::history::{History, Interaction};

use crate::storage::kv_store::KvStore;

/// KV key under which a session's history is stored.
pub const HISTORY_KEY: &str = "history";

/// Bounded history storage addressed by session key.
pub struct HistoryStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Access the underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Load the persisted history, or an empty one if nothing was stored yet.
    pub async fn load(&self, session_key: &str) -> Result<History, RepositoryError> {
        match self.kv.get(session_key, HISTORY_KEY).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| RepositoryError::Serialization(format!("invalid history: {e}"))),
            None => Ok(History::new()),
        }
    }

    /// Append a record, evicting the oldest entries past the bound, and
    /// persist the result. Returns the history as written.
    pub async fn append(
        &self,
        session_key: &str,
        record: Interaction,
    ) -> Result<History, RepositoryError> {
        let mut history = self.load(session_key).await?;
        let evicted = history.push(record);

        let value = serde_json::to_value(&history)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        self.kv.set(session_key, HISTORY_KEY, &value).await?;

        debug!(session_key, len = history.len(), evicted, "history appended");
        Ok(history)
    }

    /// Replace the history with the empty sequence.
    pub async fn clear(&self, session_key: &str) -> Result<(), RepositoryError> {
        self.kv.delete(session_key, HISTORY_KEY).await?;
        debug!(session_key, "history cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingKvStore, MemoryKvStore};
    use tutor_types::history::MAX_HISTORY;

    fn record(n: usize) -> Interaction {
        Interaction {
            timestamp: n as i64,
            user_message: format!("q{n}"),
            ai_response: format!("a{n}"),
        }
    }

    #[tokio::test]
    async fn test_load_missing_key_is_empty() {
        let store = HistoryStore::new(MemoryKvStore::default());
        let history = store.load("nobody").await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_append_then_load() {
        let store = HistoryStore::new(MemoryKvStore::default());
        store.append("alice", record(1)).await.unwrap();
        store.append("alice", record(2)).await.unwrap();

        let history = store.load("alice").await.unwrap();
        let stamps: Vec<i64> = history.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_append_enforces_fifo_bound() {
        let store = HistoryStore::new(MemoryKvStore::default());
        for n in 1..=21 {
            store.append("alice", record(n)).await.unwrap();
        }

        let history = store.load("alice").await.unwrap();
        assert_eq!(history.len(), MAX_HISTORY);
        let stamps: Vec<i64> = history.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, (2..=21).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_clear_then_load_is_empty() {
        let store = HistoryStore::new(MemoryKvStore::default());
        store.append("alice", record(1)).await.unwrap();
        store.clear("alice").await.unwrap();
        assert!(store.load("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let store = HistoryStore::new(MemoryKvStore::default());
        store.append("alice", record(1)).await.unwrap();
        let first = store.load("alice").await.unwrap();
        let second = store.load("alice").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let store = HistoryStore::new(MemoryKvStore::default());
        store.append("alice", record(1)).await.unwrap();
        store.append("bob", record(2)).await.unwrap();
        store.clear("bob").await.unwrap();

        assert_eq!(store.load("alice").await.unwrap().len(), 1);
        assert!(store.load("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_fault_surfaces() {
        let store = HistoryStore::new(FailingKvStore);
        assert!(store.load("alice").await.is_err());
        assert!(store.append("alice", record(1)).await.is_err());
        assert!(store.clear("alice").await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_value_is_serialization_error() {
        let kv = MemoryKvStore::default();
        kv.set("alice", HISTORY_KEY, &serde_json::json!({"not": "a list"}))
            .await
            .unwrap();
        let store = HistoryStore::new(kv);
        let err = store.load("alice").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
