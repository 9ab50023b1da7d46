use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use uuid::Uuid;

use crate::models::ArtifactKind;

/// Run-scoped corner of the configured working directory.
///
/// Snapshots of one run live under `{workdir}/{run_id}/` and the directory
/// is removed as a unit when the run reaches a terminal state. The
/// downloaded output is a sibling file, `{workdir}/{run_id}.gif`, so it
/// survives the teardown.
#[derive(Debug)]
pub struct RunWorkspace {
    run_id: Uuid,
    root: PathBuf,
}

impl RunWorkspace {
    /// Allocate the directory for one run.
    pub fn create(workdir: &Path) -> Result<Self> {
        let run_id = Uuid::new_v4();
        let root = workdir.join(run_id.to_string());
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create run workspace {root:?}"))?;
        Ok(Self { run_id, root })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Fresh uniquely named path inside the workspace for a `kind` artifact.
    pub fn snapshot_path(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(format!("{}.{}", Uuid::new_v4(), kind.extension()))
    }

    /// Path of the run's final output, next to (not inside) the workspace.
    pub fn output_path(&self, kind: ArtifactKind) -> PathBuf {
        self.root.with_extension(kind.extension())
    }

    /// Remove the workspace directory and everything left in it.
    /// Best-effort and idempotent; also runs on drop.
    pub fn teardown(&self) {
        if let Err(err) = fs::remove_dir_all(&self.root) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove run workspace {:?}: {err}", self.root);
            }
        }
    }
}

impl Drop for RunWorkspace {
    fn drop(&mut self) {
        self.teardown();
    }
}
