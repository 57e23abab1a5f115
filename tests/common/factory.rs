use serde_json::Value;

use mocksmith::models::{EndpointSettings, MockEndpoint};
use mocksmith::state::AppState;

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create an endpoint with default settings and an exact slug
    pub async fn create_endpoint(&self, slug: &str, data: Value) -> MockEndpoint {
        self.create_with_settings(slug, data, EndpointSettings::default())
            .await
    }

    /// Create an endpoint with specific chaos/routing settings
    pub async fn create_with_settings(
        &self,
        slug: &str,
        data: Value,
        settings: EndpointSettings,
    ) -> MockEndpoint {
        let mut endpoint = MockEndpoint::new(
            format!("test endpoint {}", slug),
            format!("Test {}", slug),
            slug.to_string(),
            data.clone(),
            mocksmith::services::generator::generate_schema(&data),
        );
        endpoint.settings = settings;

        self.state.store.create(endpoint).await.unwrap()
    }
}
