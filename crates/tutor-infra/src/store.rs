//! Runtime selection between the durable and in-memory history backends.

use std::path::Path;

use tutor_core::storage::kv_store::KvStore;
use tutor_types::error::RepositoryError;

use crate::memory::InMemoryKvStore;
use crate::sqlite::kv::SqliteKvStore;
use crate::sqlite::pool::{DatabasePool, database_url};

/// The `KvStore` chosen at startup.
///
/// An enum rather than a trait object, since `KvStore` returns `impl Future`.
#[derive(Clone)]
pub enum KvBackend {
    Sqlite(SqliteKvStore),
    Memory(InMemoryKvStore),
}

impl KvBackend {
    /// Open the SQLite database under `data_dir`, creating the directory and
    /// running migrations as needed.
    pub async fn open_sqlite(data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let url = format!("{}?mode=rwc", database_url(data_dir));
        let pool = DatabasePool::new(&url).await?;
        tracing::info!(path = %data_dir.display(), "history database ready");
        Ok(Self::Sqlite(SqliteKvStore::new(pool)))
    }

    pub fn memory() -> Self {
        Self::Memory(InMemoryKvStore::new())
    }

    /// Short label for logs and `/health`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Memory(_) => "memory",
        }
    }

    /// Release database connections. No-op for the in-memory store.
    pub async fn close(&self) {
        if let Self::Sqlite(store) = self {
            store.pool().close().await;
        }
    }
}

impl KvStore for KvBackend {
    async fn get(
        &self,
        scope: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, RepositoryError> {
        match self {
            Self::Sqlite(store) => store.get(scope, key).await,
            Self::Memory(store) => store.get(scope, key).await,
        }
    }

    async fn set(
        &self,
        scope: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        match self {
            Self::Sqlite(store) => store.set(scope, key, value).await,
            Self::Memory(store) => store.set(scope, key, value).await,
        }
    }

    async fn delete(&self, scope: &str, key: &str) -> Result<(), RepositoryError> {
        match self {
            Self::Sqlite(store) => store.delete(scope, key).await,
            Self::Memory(store) => store.delete(scope, key).await,
        }
    }
}
