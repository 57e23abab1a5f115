use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{MockEndpoint, UpdateEndpoint};
use crate::store::EndpointStore;

/// In-memory endpoint store. The default backend; also keeps tests off
/// the filesystem.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, MockEndpoint>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EndpointStore for MemoryStore {
    async fn create(&self, endpoint: MockEndpoint) -> AppResult<MockEndpoint> {
        let mut inner = self.inner.lock().await;
        inner.insert(endpoint.id.clone(), endpoint.clone());
        Ok(endpoint)
    }

    async fn get(&self, id: &str) -> AppResult<Option<MockEndpoint>> {
        let inner = self.inner.lock().await;
        Ok(inner.get(id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<MockEndpoint>> {
        let inner = self.inner.lock().await;
        Ok(inner.values().find(|e| e.slug == slug).cloned())
    }

    async fn update(&self, id: &str, update: UpdateEndpoint) -> AppResult<Option<MockEndpoint>> {
        let mut inner = self.inner.lock().await;
        match inner.get_mut(id) {
            Some(endpoint) => {
                endpoint.apply(update)?;
                Ok(Some(endpoint.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        Ok(inner.remove(id).is_some())
    }

    async fn list(&self) -> AppResult<Vec<MockEndpoint>> {
        let inner = self.inner.lock().await;
        let mut endpoints: Vec<MockEndpoint> = inner.values().cloned().collect();
        endpoints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(endpoints)
    }

    async fn clear(&self) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        inner.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::Duration;

    fn endpoint(slug: &str) -> MockEndpoint {
        MockEndpoint::new(
            format!("a list of {}", slug),
            slug.to_string(),
            format!("{}-abc123", slug),
            json!([{"id": 1}]),
            json!({"type": "array"}),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        let created = store.create(endpoint("widgets")).await.unwrap();

        let fetched = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.slug, "widgets-abc123");

        let by_slug = store.get_by_slug("widgets-abc123").await.unwrap().unwrap();
        assert_eq!(by_slug.id, created.id);

        assert!(store.get("missing").await.unwrap().is_none());
        assert!(store.get_by_slug("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_and_touches_timestamp() {
        let store = MemoryStore::new();
        let created = store.create(endpoint("widgets")).await.unwrap();

        let updated = store
            .update(
                &created.id,
                UpdateEndpoint {
                    data: Some(json!({"edited": true})),
                    settings: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.data, json!({"edited": true}));
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        let missing = store
            .update("missing", UpdateEndpoint::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let created = store.create(endpoint("widgets")).await.unwrap();

        assert!(store.delete(&created.id).await.unwrap());
        assert!(!store.delete(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryStore::new();

        let mut first = endpoint("oldest");
        first.created_at -= Duration::minutes(10);
        first.updated_at = first.created_at;
        store.create(first).await.unwrap();
        store.create(endpoint("newest")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "newest");
        assert_eq!(listed[1].name, "oldest");
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryStore::new();
        store.create(endpoint("widgets")).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
