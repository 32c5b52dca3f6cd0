//! Fetching `url` media for the send endpoints

use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::application::errors::FetchError;

/// Download `url` into a fresh `api_media_*` file under `dir`.
///
/// The file is left on disk; the caller removes it after sending.
pub async fn download_to_temp(client: &Client, url: &str, dir: &Path, timeout_secs: u64) -> Result<PathBuf, FetchError> {
    let classify = |e: reqwest::Error| {
        if e.is_timeout() {
            FetchError::Timeout(timeout_secs)
        } else {
            FetchError::Body(e.to_string())
        }
    };

    let mut response = client.get(url).send().await.map_err(classify)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    tokio::fs::create_dir_all(dir).await.map_err(FetchError::TempFile)?;
    let named = tempfile::Builder::new()
        .prefix("api_media_")
        .tempfile_in(dir)
        .map_err(FetchError::TempFile)?;
    let (file, path) = named.keep().map_err(|e| FetchError::TempFile(e.error))?;

    let mut file = tokio::fs::File::from_std(file);
    let written = async {
        while let Some(chunk) = response.chunk().await.map_err(classify)? {
            file.write_all(&chunk).await.map_err(FetchError::Write)?;
        }
        file.flush().await.map_err(FetchError::Write)
    }
    .await;

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&path).await;
        return Err(e);
    }

    Ok(path)
}
