//! Application state wiring the chat service to concrete adapters.
//!
//! `ChatService` is generic over its `KvStore`; AppState pins it to
//! [`KvBackend`], chosen at startup.

use std::path::PathBuf;
use std::sync::Arc;

use tutor_core::chat::service::ChatService;
use tutor_core::history::store::HistoryStore;
use tutor_core::llm::box_provider::BoxLlmProvider;
use tutor_infra::llm::create_provider_or_unconfigured;
use tutor_infra::store::KvBackend;
use tutor_types::config::TutorConfig;

pub type ConcreteChatService = ChatService<KvBackend>;

/// Shared application state used by both CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub store: KvBackend,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Open the history store and build the inference provider.
    ///
    /// `ephemeral` keeps history in memory only.
    pub async fn init(data_dir: PathBuf, config: TutorConfig, ephemeral: bool) -> anyhow::Result<Self> {
        let store = if ephemeral {
            KvBackend::memory()
        } else {
            KvBackend::open_sqlite(&data_dir).await?
        };
        let provider = create_provider_or_unconfigured(&config.provider);

        Ok(Self::from_parts(store, provider, config, data_dir))
    }

    pub fn from_parts(
        store: KvBackend,
        provider: BoxLlmProvider,
        config: TutorConfig,
        data_dir: PathBuf,
    ) -> Self {
        let chat_service = ChatService::new(
            HistoryStore::new(store.clone()),
            provider,
            config.provider.model.clone(),
            config.chat.clone(),
        );

        Self {
            chat_service: Arc::new(chat_service),
            store,
            data_dir,
        }
    }
}
