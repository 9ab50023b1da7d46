use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use log::warn;
use rayon::prelude::*;

use crate::common::SNAPSHOT_RAYON_POOL;
use crate::models::{ArtifactKind, AssetRef, BoundingSize, LocalArtifact};
use crate::pipeline::workspace::RunWorkspace;
use crate::sources::AssetSource;

/// Outcome of the extraction stage: one slot per input asset, in input
/// order. Successes carry the persisted snapshot; failures carry the reason
/// and are absorbed by the caller, never propagated.
pub type ExtractOutcome = Vec<Result<LocalArtifact>>;

/// Render every asset to a bounded JPEG inside the run workspace.
///
/// Assets render concurrently on the snapshot pool; the call resolves only
/// once every render has finished. Each failed item is logged here and left
/// in its slot for the caller's accounting.
pub async fn extract_snapshots(
    source: Arc<dyn AssetSource>,
    assets: Vec<AssetRef>,
    max_size: BoundingSize,
    workspace: &RunWorkspace,
    quality: u8,
) -> ExtractOutcome {
    let targets: Vec<_> = assets
        .iter()
        .map(|_| workspace.snapshot_path(ArtifactKind::Snapshot))
        .collect();

    let outcome = tokio::task::spawn_blocking(move || {
        SNAPSHOT_RAYON_POOL.install(|| {
            assets
                .into_par_iter()
                .zip(targets)
                .map(|(asset, target)| render_one(&*source, &asset, max_size, &target, quality))
                .collect::<Vec<_>>()
        })
    })
    .await
    .expect("blocking task panicked");

    for slot in &outcome {
        if let Err(err) = slot {
            warn!("Snapshot skipped: {err:#}");
        }
    }
    outcome
}

fn render_one(
    source: &dyn AssetSource,
    asset: &AssetRef,
    max_size: BoundingSize,
    target: &Path,
    quality: u8,
) -> Result<LocalArtifact> {
    let image = source
        .render_snapshot(asset, max_size)
        .with_context(|| format!("Source produced no snapshot for {asset}"))?;

    let file =
        File::create(target).with_context(|| format!("Failed to create {target:?}"))?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .with_context(|| format!("Failed to encode the snapshot for {asset}"))?;

    Ok(LocalArtifact::new(target, ArtifactKind::Snapshot))
}
