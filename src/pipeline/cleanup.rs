use std::fs;
use std::sync::Arc;

use log::{debug, warn};

use crate::models::{LocalArtifact, RemoteHandle};
use crate::remote::MediaStore;

/// Remove local artifacts, logging and swallowing every failure.
/// Already-missing files are not an error.
pub fn delete_local(artifacts: &[LocalArtifact]) {
    for artifact in artifacts {
        match fs::remove_file(artifact.path()) {
            Ok(()) => debug!("Deleted local artifact {:?}", artifact.path()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!("Failed to delete {:?}: {err}", artifact.path()),
        }
    }
}

/// Issue one detached deletion task per handle.
///
/// Nothing awaits the results and failures are only logged. The spawned
/// tasks outlive the run that issued them.
pub fn delete_remote_detached(store: &Arc<dyn MediaStore>, handles: Vec<RemoteHandle>) {
    for handle in handles {
        let store = Arc::clone(store);
        tokio::spawn(async move {
            match store.delete(&handle).await {
                Ok(()) => debug!("Deleted remote file {handle}"),
                Err(err) => warn!("Remote delete of {handle} failed: {err:#}"),
            }
        });
    }
}
