//! Per-user session actors.
//!
//! Every session key is owned by exactly one actor task. The actor drains a
//! single-consumer mailbox, so all reads and writes for that key run one at a
//! time in arrival order, while actors for different keys run in parallel.
//! The [`registry::SessionRegistry`] routes a key to its actor, spawning it
//! lazily on first use.

pub mod actor;
pub mod registry;

use thiserror::Error;
use tutor_types::error::{ChatError, RepositoryError};

/// Errors returned through a [`actor::SessionHandle`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The actor for this key is no longer accepting commands.
    #[error("session actor for '{0}' is not running")]
    MailboxClosed(String),

    /// The history store failed while the actor handled the command.
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl From<SessionError> for ChatError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::MailboxClosed(key) => ChatError::SessionUnavailable(key),
            SessionError::Storage(e) => ChatError::StorageUnavailable(e.to_string()),
        }
    }
}
