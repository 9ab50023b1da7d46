use std::time::Duration;

use log::warn;
use tokio::time::timeout;

use crate::models::{LocalArtifact, RemoteHandle};
use crate::pipeline::cancel::CancelToken;
use crate::remote::MediaStore;

/// Upload the snapshot set in one batched call, bounded by `wait`.
///
/// Transport failure, timeout, and cancellation are all absorbed into an
/// empty handle set: the run carries on and the miss surfaces at the
/// download stage instead. Slots the backend did not acknowledge are
/// dropped the same way.
pub async fn upload_artifacts(
    store: &dyn MediaStore,
    artifacts: &[LocalArtifact],
    wait: Duration,
    cancel: &CancelToken,
) -> Vec<RemoteHandle> {
    let slots = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Upload cancelled; continuing with an empty handle set");
            return Vec::new();
        }
        outcome = timeout(wait, store.store_batch(artifacts)) => match outcome {
            Ok(Ok(slots)) => slots,
            Ok(Err(err)) => {
                warn!("Batched store failed: {err:#}");
                return Vec::new();
            }
            Err(_) => {
                warn!("Batched store timed out after {wait:?}");
                return Vec::new();
            }
        },
    };

    if slots.len() != artifacts.len() {
        warn!(
            "Store answered {} slots for {} artifacts",
            slots.len(),
            artifacts.len()
        );
    }

    slots.into_iter().flatten().collect()
}
