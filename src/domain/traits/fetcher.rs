use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::autoreply::VideoLink;
use crate::application::errors::FetchError;

/// Fetcher - turns a recognised video link into a local file ready to send
#[async_trait]
pub trait VideoFetcher: Send + Sync {
    /// Path of the saved file; the caller owns it from here on
    async fn fetch(&self, link: &VideoLink) -> Result<PathBuf, FetchError>;
}
