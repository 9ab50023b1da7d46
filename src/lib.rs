//! Remote-composited animation pipeline.
//!
//! flipbook turns a selected set of media assets into one downloaded
//! animated image. A run walks four stages on a single serial worker:
//! bounded JPEG snapshots are rendered locally, uploaded to a remote media
//! store in one batched call, a deferred transform URL (an `animate`
//! operation over the uploaded handles) is built and fetched, and the
//! composited artifact is written next to the run's workspace. Local
//! snapshots are deleted right after the upload and the remote files are
//! deleted by detached tasks once the run is over, so no transient state
//! outlives a run whichever way it ends.
//!
//! ```ignore
//! use std::sync::Arc;
//! use flipbook::{BoundingSize, Config, HttpMediaStore, PathSource, Processor};
//!
//! let config = Config::from_env()?;
//! let processor = Processor::new(
//!     Arc::new(PathSource::new()),
//!     Arc::new(HttpMediaStore::new(&config)),
//!     &config,
//! );
//!
//! let assets = vec!["frames/one.png".into(), "frames/two.png".into()];
//! match processor.process(assets, BoundingSize::new(300, 300)).await {
//!     Some(path) => println!("animation at {path:?}"),
//!     None => eprintln!("unable to complete the process"),
//! }
//! ```

pub mod common;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod remote;
pub mod sources;

pub use config::Config;
pub use models::{
    ArtifactKind, AssetRef, BoundingSize, LocalArtifact, RemoteHandle, TransformOp, TransformSpec,
};
pub use pipeline::{CancelToken, Processor, RunHandle, RunPhase};
pub use remote::{HttpMediaStore, MediaStore};
pub use sources::{AssetSource, PathSource};
