use std::sync::Arc;

use axum_test::TestServer;
use mocksmith::build_router;
use mocksmith::chaos::{RandomSource, ThreadRandom};
use mocksmith::config::Config;
use mocksmith::state::AppState;
use mocksmith::store::MemoryStore;

/// Test configuration: memory store, no Gemini key
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        storage_path: None,
        gemini_api_key: None,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with real randomness
    pub async fn new() -> Self {
        Self::with_random(Arc::new(ThreadRandom)).await
    }

    /// Create a test application with an injected random source, so
    /// chaos outcomes are deterministic
    pub async fn with_random(random: Arc<dyn RandomSource>) -> Self {
        let state = AppState::with_parts(test_config(), Arc::new(MemoryStore::new()), random);

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}
