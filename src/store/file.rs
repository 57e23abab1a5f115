use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{MockEndpoint, UpdateEndpoint};
use crate::store::EndpointStore;

/// File-backed endpoint store: a single JSON array of records, fully
/// rewritten on every mutation.
///
/// Writes go to a sibling temp file which is then renamed over the
/// target, so a crash mid-write never leaves a truncated store behind.
pub struct FileStore {
    path: PathBuf,
    inner: Arc<Mutex<HashMap<String, MockEndpoint>>>,
}

impl FileStore {
    /// Open the store at `path`, loading any existing records. A missing
    /// file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let map = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let endpoints: Vec<MockEndpoint> = serde_json::from_slice(&bytes)?;
                tracing::info!(count = endpoints.len(), path = %path.display(), "Loaded endpoint store");
                endpoints.into_iter().map(|e| (e.id.clone(), e)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            inner: Arc::new(Mutex::new(map)),
        })
    }

    /// Rewrite the backing file from the given snapshot. Callers hold
    /// the map lock, so rewrites never interleave.
    async fn persist(&self, map: &HashMap<String, MockEndpoint>) -> AppResult<()> {
        let mut endpoints: Vec<&MockEndpoint> = map.values().collect();
        endpoints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let bytes = serde_json::to_vec_pretty(&endpoints)?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl EndpointStore for FileStore {
    async fn create(&self, endpoint: MockEndpoint) -> AppResult<MockEndpoint> {
        let mut inner = self.inner.lock().await;
        inner.insert(endpoint.id.clone(), endpoint.clone());
        self.persist(&inner).await?;
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
        let updated = match inner.get_mut(id) {
            Some(endpoint) => {
                endpoint.apply(update)?;
                endpoint.clone()
            }
            None => return Ok(None),
        };
        self.persist(&inner).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        if inner.remove(id).is_none() {
            return Ok(false);
        }
        self.persist(&inner).await?;
        Ok(true)
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
        self.persist(&inner).await?;
        Ok(())
    }
}
