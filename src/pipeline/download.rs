use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tokio::time::timeout;

use crate::models::{ArtifactKind, LocalArtifact};
use crate::pipeline::cancel::CancelToken;
use crate::remote::MediaStore;

/// Fetch the transform URL and persist the body as the run's output.
///
/// Fetching is what triggers the deferred transform chain on the service
/// side. This is the one stage whose failure reaches the caller.
pub async fn download_artifact(
    store: &dyn MediaStore,
    url: &str,
    target: PathBuf,
    wait: Duration,
    cancel: &CancelToken,
) -> Result<LocalArtifact> {
    let body = tokio::select! {
        biased;
        _ = cancel.cancelled() => bail!("Run cancelled during download"),
        outcome = timeout(wait, store.fetch(url)) => outcome
            .map_err(|_| anyhow!("Transform fetch timed out after {wait:?}"))?
            .context("Transform fetch failed")?,
    };

    tokio::fs::write(&target, &body)
        .await
        .with_context(|| format!("Failed to persist the artifact to {target:?}"))?;

    Ok(LocalArtifact::new(target, ArtifactKind::Animation))
}
