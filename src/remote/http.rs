use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use log::debug;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::MediaStore;
use crate::config::Config;
use crate::models::{LocalArtifact, RemoteHandle};

/// One slot of the batched store response. `handle` stays absent when the
/// backend did not acknowledge the corresponding part.
#[derive(Debug, Deserialize)]
struct StoreSlot {
    #[serde(default)]
    handle: Option<String>,
}

/// reqwest-backed [`MediaStore`] talking to the HTTP media service.
///
/// Uploads go to `POST {api_base}/store` as one multipart request with a
/// `file` part per artifact; deletes go to `DELETE {api_base}/file/{handle}`.
/// The API key rides along as a query parameter on both.
pub struct HttpMediaStore {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    store_location: String,
    store_access: String,
}

impl HttpMediaStore {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            store_location: config.store_location.clone(),
            store_access: config.store_access.clone(),
        }
    }

    fn store_url(&self) -> String {
        format!("{}/store", self.api_base)
    }

    fn file_url(&self, handle: &RemoteHandle) -> String {
        format!("{}/file/{}", self.api_base, handle)
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn store_batch(&self, artifacts: &[LocalArtifact]) -> Result<Vec<Option<RemoteHandle>>> {
        let bodies = try_join_all(artifacts.iter().map(|artifact| tokio::fs::read(artifact.path())))
            .await
            .context("Failed to read artifacts for upload")?;

        let mut form = Form::new();
        for (artifact, body) in artifacts.iter().zip(bodies) {
            let part = Part::bytes(body)
                .file_name(artifact.file_name())
                .mime_str(artifact.kind().mime_type())
                .context("Invalid artifact mime type")?;
            form = form.part("file", part);
        }

        let response = self
            .client
            .post(self.store_url())
            .query(&[
                ("key", self.api_key.as_str()),
                ("location", self.store_location.as_str()),
                ("access", self.store_access.as_str()),
            ])
            .multipart(form)
            .send()
            .await
            .context("Batched store request failed")?
            .error_for_status()
            .context("Batched store request was rejected")?;

        let body = response
            .bytes()
            .await
            .context("Failed to read the store response")?;
        let slots: Vec<StoreSlot> =
            serde_json::from_slice(&body).context("Malformed store response")?;
        debug!(
            "Store acknowledged {} of {} artifacts",
            slots.iter().filter(|slot| slot.handle.is_some()).count(),
            artifacts.len()
        );

        Ok(slots
            .into_iter()
            .map(|slot| slot.handle.map(RemoteHandle::new))
            .collect())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Transform fetch failed")?
            .error_for_status()
            .context("Transform fetch was rejected")?;
        let body = response
            .bytes()
            .await
            .context("Failed to read the transform response")?;
        Ok(body.to_vec())
    }

    async fn delete(&self, handle: &RemoteHandle) -> Result<()> {
        self.client
            .delete(self.file_url(handle))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .context("Delete request failed")?
            .error_for_status()
            .context("Delete request was rejected")?;
        Ok(())
    }
}
