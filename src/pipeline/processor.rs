use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::{mpsc, oneshot};

use crate::common::errors::handle_error;
use crate::config::Config;
use crate::models::{ArtifactKind, AssetRef, BoundingSize, LocalArtifact, TransformSpec};
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::workspace::RunWorkspace;
use crate::pipeline::{cleanup, download, extract, upload};
use crate::remote::{MediaStore, transform_url};
use crate::sources::AssetSource;

/// Stages of one pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Extracting,
    Uploading,
    CleaningLocal,
    Invoking,
    Downloading,
    CleaningRemote,
}

impl RunPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            RunPhase::Extracting => "extracting",
            RunPhase::Uploading => "uploading",
            RunPhase::CleaningLocal => "cleaning-local",
            RunPhase::Invoking => "invoking",
            RunPhase::Downloading => "downloading",
            RunPhase::CleaningRemote => "cleaning-remote",
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

struct ProcessRequest {
    assets: Vec<AssetRef>,
    max_size: BoundingSize,
    cancel: CancelToken,
    done: oneshot::Sender<Option<PathBuf>>,
}

/// Handle to one submitted run.
pub struct RunHandle {
    cancel: CancelToken,
    done: oneshot::Receiver<Option<PathBuf>>,
}

impl RunHandle {
    /// Request cancellation of this run. The run still walks its cleanup
    /// stages and resolves to the failure outcome.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token cancelling this run, clonable into other tasks.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Await the terminal result: the output path when the run completed,
    /// `None` when it failed. Delivered exactly once.
    pub async fn wait(self) -> Option<PathBuf> {
        self.done.await.unwrap_or_else(|_| {
            warn!("Pipeline worker dropped the run before it finished");
            None
        })
    }
}

/// Media-processing pipeline orchestrator.
///
/// One `Processor` owns one serial worker task: submitted runs execute
/// strictly in submission order, never concurrently with each other. Every
/// run walks the same stages (extract, upload, clean local, invoke,
/// download, clean remote) and always reaches its cleanup stages, whatever
/// the earlier stages did.
///
/// Construction spawns the worker, so it needs an ambient tokio runtime.
/// Dropping the `Processor` lets the worker finish the queued runs and then
/// exit.
pub struct Processor {
    requests: mpsc::UnboundedSender<ProcessRequest>,
}

impl Processor {
    pub fn new(source: Arc<dyn AssetSource>, store: Arc<dyn MediaStore>, config: &Config) -> Self {
        let (requests, inbox) = mpsc::unbounded_channel();
        let worker = Worker {
            source,
            store,
            spec: TransformSpec::animate(config.frame_delay_ms),
            api_key: config.api_key.clone(),
            cdn_base: config.cdn_base.clone(),
            workdir: config.workdir.clone(),
            upload_timeout: config.upload_timeout(),
            download_timeout: config.download_timeout(),
            jpeg_quality: config.jpeg_quality,
        };
        tokio::spawn(worker.run(inbox));
        Self { requests }
    }

    /// Queue one run behind any in-flight ones and return its handle.
    pub fn submit(&self, assets: Vec<AssetRef>, max_size: BoundingSize) -> RunHandle {
        let cancel = CancelToken::new();
        let (done_tx, done_rx) = oneshot::channel();
        let request = ProcessRequest {
            assets,
            max_size,
            cancel: cancel.clone(),
            done: done_tx,
        };
        if let Err(err) = self.requests.send(request) {
            warn!("Pipeline worker is gone; failing the run immediately");
            let _ = err.0.done.send(None);
        }
        RunHandle { cancel, done: done_rx }
    }

    /// Run the pipeline over `assets` and await the terminal result: the
    /// path of the downloaded animation, or `None` when the run failed.
    pub async fn process(&self, assets: Vec<AssetRef>, max_size: BoundingSize) -> Option<PathBuf> {
        self.submit(assets, max_size).wait().await
    }
}

struct Worker {
    source: Arc<dyn AssetSource>,
    store: Arc<dyn MediaStore>,
    spec: TransformSpec,
    api_key: String,
    cdn_base: String,
    workdir: PathBuf,
    upload_timeout: Duration,
    download_timeout: Duration,
    jpeg_quality: u8,
}

impl Worker {
    async fn run(self, mut inbox: mpsc::UnboundedReceiver<ProcessRequest>) {
        // Ends once the owning Processor is dropped and the queue is drained.
        while let Some(request) = inbox.recv().await {
            let outcome = self
                .run_pipeline(request.assets, request.max_size, &request.cancel)
                .await;
            // Ignore send errors: the caller may have given up on the result.
            let _ = request.done.send(outcome);
        }
    }

    async fn run_pipeline(
        &self,
        assets: Vec<AssetRef>,
        max_size: BoundingSize,
        cancel: &CancelToken,
    ) -> Option<PathBuf> {
        let workspace = match RunWorkspace::create(&self.workdir) {
            Ok(workspace) => workspace,
            Err(err) => {
                handle_error(err.context("Failed to allocate a run workspace"));
                return None;
            }
        };
        let run = workspace.run_id().to_string();
        info!(run = run.as_str(); "Starting pipeline over {} assets at {}", assets.len(), max_size);

        self.enter(&run, RunPhase::Extracting);
        let total = assets.len();
        let outcome = if cancel.is_cancelled() {
            Vec::new()
        } else {
            extract::extract_snapshots(
                Arc::clone(&self.source),
                assets,
                max_size,
                &workspace,
                self.jpeg_quality,
            )
            .await
        };
        let snapshots: Vec<LocalArtifact> = outcome.into_iter().flatten().collect();
        info!(run = run.as_str(); "Extracted {} of {} snapshots", snapshots.len(), total);

        // One batched call, issued even over an empty snapshot set.
        self.enter(&run, RunPhase::Uploading);
        let handles =
            upload::upload_artifacts(self.store.as_ref(), &snapshots, self.upload_timeout, cancel)
                .await;

        // Snapshots go before any transform work starts, upload or no upload.
        self.enter(&run, RunPhase::CleaningLocal);
        cleanup::delete_local(&snapshots);

        self.enter(&run, RunPhase::Invoking);
        let url =
            transform_url::build_transform_url(&self.cdn_base, &self.api_key, &self.spec, &handles);

        self.enter(&run, RunPhase::Downloading);
        let target = workspace.output_path(ArtifactKind::Animation);
        let downloaded = download::download_artifact(
            self.store.as_ref(),
            &url,
            target.clone(),
            self.download_timeout,
            cancel,
        )
        .await;

        // Always issued, whatever the download did.
        self.enter(&run, RunPhase::CleaningRemote);
        cleanup::delete_remote_detached(&self.store, handles);
        workspace.teardown();

        match downloaded {
            Ok(artifact) => {
                info!(run = run.as_str(); "Pipeline completed: {:?}", artifact.path());
                Some(artifact.path().to_path_buf())
            }
            Err(err) => {
                // A partially written output must not outlive a failed run.
                cleanup::delete_local(&[LocalArtifact::new(target, ArtifactKind::Animation)]);
                handle_error(err.context("Pipeline failed"));
                None
            }
        }
    }

    fn enter(&self, run: &str, phase: RunPhase) {
        info!(run = run, phase = phase.as_str(); "Entering phase");
    }
}
