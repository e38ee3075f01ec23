use thiserror::Error;

/// Errors from repository operations (used by trait definitions in tutor-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors surfaced by the chat orchestrator.
///
/// Inference failures are deliberately absent: they are absorbed into a
/// fallback reply and never reach the caller.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("session unavailable: {0}")]
    SessionUnavailable(String),
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        ChatError::StorageUnavailable(e.to_string())
    }
}
