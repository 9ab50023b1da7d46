pub mod errors;

use std::sync::LazyLock;

use rayon::{ThreadPool, ThreadPoolBuilder};

/// JPEG quality used when persisting extracted snapshots.
pub const SNAPSHOT_JPEG_QUALITY: u8 = 85;

/// Frame delay of the animate transform when none is configured.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 1000;

pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 60;

pub static CURRENT_NUM_THREADS: LazyLock<usize> = LazyLock::new(|| rayon::current_num_threads());

/// Dedicated Rayon pool for snapshot rendering and JPEG encoding.
/// Keeps CPU-bound extraction off the global pool and off the async runtime.
pub static SNAPSHOT_RAYON_POOL: LazyLock<ThreadPool> = LazyLock::new(|| {
    ThreadPoolBuilder::new()
        .num_threads(*CURRENT_NUM_THREADS)
        .thread_name(|i| format!("snapshot-worker-{}", i))
        .build()
        .expect("Failed to build the snapshot Rayon thread pool")
});
