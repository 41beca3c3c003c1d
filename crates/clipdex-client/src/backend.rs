//! Backend abstraction for the catalog collaborator.

use async_trait::async_trait;

use clipdex_core::{Result, SearchHit, SearchParams, VideoMetadata};

/// The three collaborator calls the workflows are built on.
///
/// Implemented by [`crate::HttpCatalogClient`] for the real API and by
/// [`crate::mock::MockCatalogBackend`] for tests.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Trigger a remote analysis of the video at `url` and return its
    /// structured metadata. Long-running; the server enforces its own
    /// processing budget.
    async fn analyze(&self, url: &str) -> Result<VideoMetadata>;

    /// Persist a reviewed record.
    async fn save(&self, metadata: &VideoMetadata) -> Result<()>;

    /// Run a semantic search over previously persisted records.
    async fn search(&self, params: SearchParams) -> Result<Vec<SearchHit>>;
}
