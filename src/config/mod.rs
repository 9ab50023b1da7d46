use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenv::dotenv;
use serde::Deserialize;

use crate::common::{
    DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_FRAME_DELAY_MS, DEFAULT_UPLOAD_TIMEOUT_SECS,
    SNAPSHOT_JPEG_QUALITY,
};

/// Pipeline configuration, read from `FLIPBOOK_`-prefixed environment
/// variables by [`Config::from_env`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API key identifying the application to the media store.
    pub api_key: String,
    /// Base URL of the store and delete API, e.g. `https://api.example.com`.
    pub api_base: String,
    /// Base URL of the transform CDN, e.g. `https://cdn.example.com`.
    pub cdn_base: String,
    /// Storage location forwarded with the batched store call.
    #[serde(default = "default_store_location")]
    pub store_location: String,
    /// Storage access level forwarded with the batched store call.
    #[serde(default = "default_store_access")]
    pub store_access: String,
    /// Directory holding run workspaces and downloaded artifacts.
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
    /// Frame delay in milliseconds applied by the animate transform.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
    /// JPEG quality for extracted snapshots (1-100).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_store_location() -> String {
    "s3".to_string()
}

fn default_store_access() -> String {
    "private".to_string()
}

fn default_workdir() -> PathBuf {
    std::env::temp_dir().join("flipbook")
}

fn default_upload_timeout_secs() -> u64 {
    DEFAULT_UPLOAD_TIMEOUT_SECS
}

fn default_download_timeout_secs() -> u64 {
    DEFAULT_DOWNLOAD_TIMEOUT_SECS
}

fn default_frame_delay_ms() -> u64 {
    DEFAULT_FRAME_DELAY_MS
}

fn default_jpeg_quality() -> u8 {
    SNAPSHOT_JPEG_QUALITY
}

impl Config {
    /// Load the configuration from the environment, reading `.env` first if
    /// one is present.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        envy::prefixed("FLIPBOOK_")
            .from_env()
            .context("Failed to load FLIPBOOK_* configuration from the environment")
    }

    /// Configuration for the given endpoints with every optional field at
    /// its default.
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        cdn_base: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into(),
            cdn_base: cdn_base.into(),
            store_location: default_store_location(),
            store_access: default_store_access(),
            workdir: default_workdir(),
            upload_timeout_secs: default_upload_timeout_secs(),
            download_timeout_secs: default_download_timeout_secs(),
            frame_delay_ms: default_frame_delay_ms(),
            jpeg_quality: default_jpeg_quality(),
        }
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn required_fields_with_defaults() {
        let config: Config = envy::prefixed("FLIPBOOK_")
            .from_iter(env(&[
                ("FLIPBOOK_API_KEY", "k"),
                ("FLIPBOOK_API_BASE", "https://api.test"),
                ("FLIPBOOK_CDN_BASE", "https://cdn.test"),
            ]))
            .unwrap();

        assert_eq!(config.api_key, "k");
        assert_eq!(config.store_location, "s3");
        assert_eq!(config.store_access, "private");
        assert_eq!(config.upload_timeout(), Duration::from_secs(120));
        assert_eq!(config.download_timeout(), Duration::from_secs(60));
        assert_eq!(config.frame_delay_ms, 1000);
        assert_eq!(config.jpeg_quality, 85);
    }

    #[test]
    fn overrides_are_honored() {
        let config: Config = envy::prefixed("FLIPBOOK_")
            .from_iter(env(&[
                ("FLIPBOOK_API_KEY", "k"),
                ("FLIPBOOK_API_BASE", "https://api.test"),
                ("FLIPBOOK_CDN_BASE", "https://cdn.test"),
                ("FLIPBOOK_STORE_LOCATION", "gcs"),
                ("FLIPBOOK_FRAME_DELAY_MS", "250"),
                ("FLIPBOOK_WORKDIR", "/tmp/elsewhere"),
            ]))
            .unwrap();

        assert_eq!(config.store_location, "gcs");
        assert_eq!(config.frame_delay_ms, 250);
        assert_eq!(config.workdir, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let result: Result<Config, _> = envy::prefixed("FLIPBOOK_")
            .from_iter(env(&[("FLIPBOOK_API_KEY", "k")]));
        assert!(result.is_err());
    }
}
