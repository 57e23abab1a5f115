use std::sync::Arc;

use crate::chaos::{RandomSource, ThreadRandom};
use crate::config::Config;
use crate::error::AppResult;
use crate::services::GeminiClient;
use crate::store::{EndpointStore, FileStore, MemoryStore};

/// Application state shared across all handlers.
///
/// The store and random source are injected trait objects so tests can
/// substitute deterministic implementations.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EndpointStore>,
    pub random: Arc<dyn RandomSource>,
    pub gemini: Arc<GeminiClient>,
    pub config: Config,
}

impl AppState {
    /// Create the process-wide state: file-backed store when
    /// `STORAGE_PATH` is configured, memory-only otherwise.
    pub async fn new(config: Config) -> AppResult<Self> {
        let store: Arc<dyn EndpointStore> = match &config.storage_path {
            Some(path) => Arc::new(FileStore::open(path.clone()).await?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::with_parts(config, store, Arc::new(ThreadRandom)))
    }

    /// Assemble state from explicit parts (used by tests).
    pub fn with_parts(
        config: Config,
        store: Arc<dyn EndpointStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            store,
            random,
            gemini: Arc::new(GeminiClient::new()),
            config,
        }
    }
}
