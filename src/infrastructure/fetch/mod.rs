//! Client for the external video fetch service

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::application::autoreply::{Platform, VideoLink};
use crate::application::errors::{BotError, FetchError};
use crate::domain::traits::VideoFetcher;
use crate::infrastructure::config::VideoConfig;

#[derive(Serialize)]
struct FetchRequest<'a> {
    url: &'a str,
    platform: Platform,
    quality: &'a str,
    format: &'a str,
}

/// Downloads videos through the fetch service into the temp directory.
///
/// When the service cannot be reached at all a placeholder file is written
/// instead, so the rest of the pipeline still has something to send. The
/// response status is not checked: whatever body comes back is saved.
pub struct FetchClient {
    client: Client,
    config: VideoConfig,
}

impl FetchClient {
    pub fn new(config: VideoConfig) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn temp_dir(&self) -> &Path {
        &self.config.temp_dir
    }

    /// Returns the path of the downloaded (or placeholder) file
    pub async fn download(&self, link: &VideoLink) -> Result<PathBuf, FetchError> {
        let request = FetchRequest {
            url: &link.url,
            platform: link.platform,
            quality: &self.config.quality,
            format: &self.config.format,
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&request);
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            builder = builder.bearer_auth(key);
        }

        let mut response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(FetchError::Timeout(self.config.timeout_seconds)),
            Err(e) => {
                tracing::warn!("Fetch service unreachable ({}), writing placeholder", e);
                return self.write_placeholder(link.platform).await;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Fetch service answered {} for {}, saving body anyway", response.status(), link.url);
        }

        let (file, path) = self.create_temp(format!("video_{}_", link.platform)).await?;
        let mut file = tokio::fs::File::from_std(file);

        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => file.write_all(&chunk).await.map_err(FetchError::Write)?,
                Ok(None) => break,
                Err(e) if e.is_timeout() => return Err(FetchError::Timeout(self.config.timeout_seconds)),
                Err(e) => return Err(FetchError::Body(e.to_string())),
            }
        }
        file.flush().await.map_err(FetchError::Write)?;

        tracing::info!("Saved {} video to {}", link.platform, path.display());
        Ok(path)
    }

    async fn write_placeholder(&self, platform: Platform) -> Result<PathBuf, FetchError> {
        let (file, path) = self.create_temp(format!("placeholder_{}_video_", platform)).await.map_err(|e| match e {
            FetchError::TempFile(io) => FetchError::Placeholder(io),
            other => other,
        })?;

        let mut file = tokio::fs::File::from_std(file);
        let content = format!("Placeholder {} video: fetch service unavailable", platform);
        file.write_all(content.as_bytes()).await.map_err(FetchError::Placeholder)?;
        file.flush().await.map_err(FetchError::Placeholder)?;

        Ok(path)
    }

    async fn create_temp(&self, prefix: String) -> Result<(std::fs::File, PathBuf), FetchError> {
        tokio::fs::create_dir_all(&self.config.temp_dir)
            .await
            .map_err(FetchError::TempFile)?;

        let suffix = format!(".{}", self.config.format);
        let named = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(&self.config.temp_dir)
            .map_err(FetchError::TempFile)?;

        named.keep().map_err(|e| FetchError::TempFile(e.error))
    }
}

#[async_trait]
impl VideoFetcher for FetchClient {
    async fn fetch(&self, link: &VideoLink) -> Result<PathBuf, FetchError> {
        self.download(link).await
    }
}
