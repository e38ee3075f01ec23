//! Routing table from session key to the actor that owns it.
//!
//! Actors are spawned lazily on first use and retained for the lifetime of
//! the registry. Creation goes through `DashMap::entry`, which holds the shard
//! lock, so two racing requests for a new key always end up at the same actor.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::actor::{self, SessionHandle};
use crate::history::store::HistoryStore;
use crate::storage::kv_store::KvStore;

/// Lazily populated map of session key -> actor handle.
pub struct SessionRegistry<S: KvStore + 'static> {
    store: Arc<HistoryStore<S>>,
    sessions: DashMap<String, SessionHandle>,
}

impl<S: KvStore + 'static> SessionRegistry<S> {
    pub fn new(store: HistoryStore<S>) -> Self {
        Self {
            store: Arc::new(store),
            sessions: DashMap::new(),
        }
    }

    /// Access the history store shared by all actors.
    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }

    /// Return the actor for `key`, spawning it if this is the first request.
    ///
    /// An actor whose task has stopped is replaced. The handle is cloned out
    /// immediately so no map guard outlives this call.
    pub fn resolve(&self, key: &str) -> SessionHandle {
        if let Some(handle) = self.sessions.get(key) {
            if !handle.is_closed() {
                return handle.clone();
            }
        }

        let mut entry = self
            .sessions
            .entry(key.to_string())
            .or_insert_with(|| {
                debug!(session_key = key, "spawning session actor");
                actor::spawn(key, Arc::clone(&self.store))
            });
        if entry.is_closed() {
            warn!(session_key = key, "session actor stopped; respawning");
            *entry = actor::spawn(key, Arc::clone(&self.store));
        }
        entry.clone()
    }

    /// Number of session actors currently registered.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
