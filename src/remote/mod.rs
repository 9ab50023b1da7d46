pub mod http;
pub mod transform_url;

pub use http::HttpMediaStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{LocalArtifact, RemoteHandle};

/// Remote media store driven by the pipeline: one batched upload per run,
/// transform URL fetches, and per-handle deletion.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store every artifact in one batched request.
    ///
    /// The answer carries one slot per input, in order. A slot without a
    /// handle means the backend did not acknowledge that artifact; the
    /// caller drops such slots and carries on.
    async fn store_batch(&self, artifacts: &[LocalArtifact]) -> Result<Vec<Option<RemoteHandle>>>;

    /// Fetch `url` and return the response body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    /// Delete one stored file.
    async fn delete(&self, handle: &RemoteHandle) -> Result<()>;
}
