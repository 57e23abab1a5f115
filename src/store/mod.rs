pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{MockEndpoint, UpdateEndpoint};

/// Keyed persistence for endpoint records.
///
/// Each call is atomic: no caller ever observes a partially-written
/// record. Cross-call consistency is not promised; a dispatch racing an
/// update may see either version.
///
/// Slug uniqueness is by convention only (random suffixes at creation);
/// the store takes records first-writer-wins and does not reject
/// duplicate slugs.
#[async_trait]
pub trait EndpointStore: Send + Sync {
    async fn create(&self, endpoint: MockEndpoint) -> AppResult<MockEndpoint>;

    async fn get(&self, id: &str) -> AppResult<Option<MockEndpoint>>;

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<MockEndpoint>>;

    /// Merge a partial update into the record and refresh its
    /// `updated_at`. Returns `None` when no record has this id.
    async fn update(&self, id: &str, update: UpdateEndpoint) -> AppResult<Option<MockEndpoint>>;

    /// Returns whether a record existed and was removed.
    async fn delete(&self, id: &str) -> AppResult<bool>;

    /// All endpoints, newest `created_at` first.
    async fn list(&self) -> AppResult<Vec<MockEndpoint>>;

    async fn clear(&self) -> AppResult<()>;
}
