//! Shared fixtures for the pipeline integration tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use flipbook::{AssetRef, AssetSource, BoundingSize, LocalArtifact, MediaStore, RemoteHandle};
use image::DynamicImage;

/// Body answered by the mock store for every transform fetch.
pub const GIF_BODY: &[u8] = b"GIF89a flipbook test body";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Poll `predicate` for up to a second, yielding between attempts.
pub async fn eventually(predicate: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    predicate()
}

/// Renders a small solid-color image for every asset not marked as failing.
pub struct StubSource {
    failing: HashSet<String>,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
        }
    }

    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl AssetSource for StubSource {
    fn render_snapshot(&self, asset: &AssetRef, max_size: BoundingSize) -> Option<DynamicImage> {
        if self.failing.contains(asset.as_str()) {
            return None;
        }
        Some(DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            max_size.width.min(8),
            max_size.height.min(8),
            image::Rgb([200, 40, 40]),
        )))
    }
}

/// One recorded `store_batch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    pub artifact_count: usize,
    /// Whether every uploaded file still existed on disk at upload time.
    pub all_files_present: bool,
}

/// Recording in-memory media store with scriptable failures.
///
/// Handles are issued as `handle-{call}-{slot}` so tests can tell runs and
/// slots apart.
pub struct MockStore {
    store_calls: Mutex<Vec<StoreCall>>,
    fetches: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    unacked: HashSet<usize>,
    fetch_body: Option<Vec<u8>>,
    delete_fails: bool,
    stage_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            store_calls: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
            unacked: HashSet::new(),
            fetch_body: Some(GIF_BODY.to_vec()),
            delete_fails: false,
            stage_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Make every transform fetch fail.
    pub fn fetch_error(mut self) -> Self {
        self.fetch_body = None;
        self
    }

    /// Answer the given slots without a handle.
    pub fn unacked(mut self, slots: &[usize]) -> Self {
        self.unacked = slots.iter().copied().collect();
        self
    }

    /// Refuse every delete call. The attempt is still recorded.
    pub fn delete_error(mut self) -> Self {
        self.delete_fails = true;
        self
    }

    /// Hold every store and fetch call open for `delay`.
    pub fn stage_delay(mut self, delay: Duration) -> Self {
        self.stage_delay = delay;
        self
    }

    pub fn store_calls(&self) -> Vec<StoreCall> {
        self.store_calls.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    /// Recorded delete attempts, refused ones included.
    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    /// Highest number of store and fetch calls ever in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter_stage(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.stage_delay.is_zero() {
            tokio::time::sleep(self.stage_delay).await;
        }
    }

    fn leave_stage(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaStore for MockStore {
    async fn store_batch(&self, artifacts: &[LocalArtifact]) -> Result<Vec<Option<RemoteHandle>>> {
        self.enter_stage().await;
        let call = {
            let mut calls = self.store_calls.lock().unwrap();
            calls.push(StoreCall {
                artifact_count: artifacts.len(),
                all_files_present: artifacts.iter().all(|artifact| artifact.path().is_file()),
            });
            calls.len() - 1
        };
        let slots = (0..artifacts.len())
            .map(|slot| {
                (!self.unacked.contains(&slot))
                    .then(|| RemoteHandle::new(format!("handle-{call}-{slot}")))
            })
            .collect();
        self.leave_stage();
        Ok(slots)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.enter_stage().await;
        self.fetches.lock().unwrap().push(url.to_string());
        let outcome = match &self.fetch_body {
            Some(body) => Ok(body.clone()),
            None => Err(anyhow!("transform fetch refused")),
        };
        self.leave_stage();
        outcome
    }

    async fn delete(&self, handle: &RemoteHandle) -> Result<()> {
        self.deletes.lock().unwrap().push(handle.as_str().to_string());
        if self.delete_fails {
            return Err(anyhow!("delete refused"));
        }
        Ok(())
    }
}
