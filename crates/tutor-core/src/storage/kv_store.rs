//! Key-value store trait.
//!
//! Defines the interface for session-scoped key-value storage.
//! Implementations live in tutor-infra.

use tutor_types::error::RepositoryError;

/// Trait for session-scoped key-value persistent storage.
///
/// Stores arbitrary JSON values keyed by a scope (the session key) and a
/// string key within that scope. Each `set` must be all-or-nothing.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        scope: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        scope: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(
        &self,
        scope: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
