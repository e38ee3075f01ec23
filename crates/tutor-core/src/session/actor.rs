//! The session actor task and the handle used to talk to it.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use tutor_types::error::RepositoryError;
use tutor_types::history::{History, Interaction};

use super::SessionError;
use crate::history::store::HistoryStore;
use crate::storage::kv_store::KvStore;

/// Buffer size for per-session mailboxes.
const MAILBOX_CAPACITY: usize = 64;

type Reply<T> = oneshot::Sender<Result<T, RepositoryError>>;

/// Commands accepted by a session actor.
enum SessionCommand {
    GetHistory {
        reply: Reply<History>,
    },
    RecordInteraction {
        user_message: String,
        ai_response: String,
        reply: Reply<Interaction>,
    },
    ClearHistory {
        reply: Reply<()>,
    },
}

/// Cloneable address of one session actor.
#[derive(Clone)]
pub struct SessionHandle {
    key: Arc<str>,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// The session key this actor owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the actor task has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Read the full history for this session.
    pub async fn get_history(&self) -> Result<History, SessionError> {
        self.request(|reply| SessionCommand::GetHistory { reply })
            .await
    }

    /// Record one completed turn. The timestamp is taken when the actor
    /// applies the command, so stamps follow the application order.
    pub async fn record_interaction(
        &self,
        user_message: impl Into<String>,
        ai_response: impl Into<String>,
    ) -> Result<Interaction, SessionError> {
        let user_message = user_message.into();
        let ai_response = ai_response.into();
        self.request(|reply| SessionCommand::RecordInteraction {
            user_message,
            ai_response,
            reply,
        })
        .await
    }

    /// Replace the history with the empty sequence.
    pub async fn clear_history(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::ClearHistory { reply })
            .await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(command(tx))
            .await
            .map_err(|_| SessionError::MailboxClosed(self.key.to_string()))?;
        let result = rx
            .await
            .map_err(|_| SessionError::MailboxClosed(self.key.to_string()))?;
        Ok(result?)
    }
}

/// Owns one session key and applies its commands strictly one at a time.
struct SessionActor<S: KvStore + 'static> {
    key: Arc<str>,
    store: Arc<HistoryStore<S>>,
}

impl<S: KvStore + 'static> SessionActor<S> {
    async fn run(self, mut mailbox: mpsc::Receiver<SessionCommand>) {
        debug!(session_key = %self.key, "session actor started");
        while let Some(command) = mailbox.recv().await {
            self.handle(command).await;
        }
        debug!(session_key = %self.key, "session actor stopped");
    }

    async fn handle(&self, command: SessionCommand) {
        // A dropped reply receiver means the caller went away; the command
        // itself has still been applied in full.
        match command {
            SessionCommand::GetHistory { reply } => {
                let result = self.store.load(&self.key).await;
                let _ = reply.send(result);
            }
            SessionCommand::RecordInteraction {
                user_message,
                ai_response,
                reply,
            } => {
                let record = Interaction::new(user_message, ai_response);
                let result = self
                    .store
                    .append(&self.key, record.clone())
                    .await
                    .map(|_| record);
                if let Err(e) = &result {
                    warn!(session_key = %self.key, error = %e, "failed to record interaction");
                }
                let _ = reply.send(result);
            }
            SessionCommand::ClearHistory { reply } => {
                let result = self.store.clear(&self.key).await;
                let _ = reply.send(result);
            }
        }
    }
}

/// Spawn the actor task for `key` and return its handle.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn spawn<S: KvStore + 'static>(key: &str, store: Arc<HistoryStore<S>>) -> SessionHandle {
    let key: Arc<str> = Arc::from(key);
    let (sender, mailbox) = mpsc::channel(MAILBOX_CAPACITY);
    let actor = SessionActor {
        key: Arc::clone(&key),
        store,
    };
    tokio::spawn(actor.run(mailbox));
    SessionHandle { key, sender }
}
