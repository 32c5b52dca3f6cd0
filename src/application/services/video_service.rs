//! Detached download-and-send pipeline for video links

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::autoreply::VideoLink;
use crate::domain::entities::SenderId;
use crate::domain::traits::{OutboundGateway, VideoFetcher};

/// A video link to fetch and deliver back to `recipient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoJob {
    pub link: VideoLink,
    pub recipient: SenderId,
}

impl VideoJob {
    pub fn new(link: VideoLink, recipient: SenderId) -> Self {
        Self { link, recipient }
    }
}

/// Runs video jobs on their own tasks. Every outcome ends as a status
/// message to the recipient; nothing is returned to the spawner.
pub struct VideoService {
    fetcher: Box<dyn VideoFetcher>,
    gateway: Arc<dyn OutboundGateway>,
    cleanup_after_send: bool,
}

impl VideoService {
    pub fn new(
        fetcher: impl VideoFetcher + 'static,
        gateway: Arc<dyn OutboundGateway>,
        cleanup_after_send: bool,
    ) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            gateway,
            cleanup_after_send,
        }
    }

    /// Fire and forget. Returns `None` when called outside a tokio runtime.
    pub fn spawn(self: &Arc<Self>, job: VideoJob) -> Option<JoinHandle<()>> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::error!("No async runtime, dropping {} job for {}", job.link.platform, job.recipient);
                return None;
            }
        };

        let service = Arc::clone(self);
        Some(handle.spawn(async move { service.run(job).await }))
    }

    pub async fn run(&self, job: VideoJob) {
        let status = match self.process(&job).await {
            Ok(status) | Err(status) => status,
        };

        if let Err(e) = self.gateway.send_text(&job.recipient, &status).await {
            tracing::error!("Failed to send video status to {}: {}", job.recipient, e);
        }
    }

    async fn process(&self, job: &VideoJob) -> Result<String, String> {
        let platform = job.link.platform;

        let path = self.fetcher.fetch(&job.link).await.map_err(|e| {
            tracing::warn!("{} download for {} failed: {}", platform, job.recipient, e);
            format!("❌ Failed to download {} video: {}", platform, e)
        })?;

        // TODO: remove `path` when the upload fails too; only the success path cleans up today
        self.gateway
            .send_video(&job.recipient, &path, &format!("🎥 Downloaded from {}", platform))
            .await
            .map_err(|e| {
                tracing::warn!("Sending {} video to {} failed: {}", platform, job.recipient, e);
                format!("❌ Failed to send video: {}", e)
            })?;

        if self.cleanup_after_send {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }

        Ok(format!("✅ Successfully downloaded and sent {} video!", platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::autoreply::Platform;
    use crate::domain::traits::gateway::recording::{RecordingGateway, Sent};
    use crate::infrastructure::config::VideoConfig;
    use crate::infrastructure::fetch::FetchClient;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn job() -> VideoJob {
        VideoJob::new(
            VideoLink {
                platform: Platform::TikTok,
                url: "https://vm.tiktok.com/ZM1".to_string(),
                id: "ZM1".to_string(),
            },
            SenderId::parse("alice@example.net").unwrap(),
        )
    }

    fn fetcher(endpoint: String, dir: &std::path::Path) -> FetchClient {
        FetchClient::new(VideoConfig {
            endpoint,
            temp_dir: dir.to_path_buf(),
            timeout_seconds: 2,
            ..VideoConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_sends_video_then_status_and_cleans_up() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
            .mount(&mock_server)
            .await;
        let dir = tempfile::tempdir().unwrap();

        let (gateway, mut rx) = RecordingGateway::new();
        let service = Arc::new(VideoService::new(
            fetcher(mock_server.uri(), dir.path()),
            Arc::new(gateway),
            true,
        ));

        service.spawn(job()).unwrap().await.unwrap();

        match rx.recv().await.unwrap() {
            Sent::Video { caption, existed, .. } => {
                assert_eq!(caption, "🎥 Downloaded from TikTok");
                assert!(existed);
            }
            other => panic!("expected video, got {:?}", other),
        }
        assert_eq!(
            rx.recv().await.unwrap(),
            Sent::Text {
                to: job().recipient,
                text: "✅ Successfully downloaded and sent TikTok video!".to_string(),
            }
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_download_failure_reported_as_text() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
            .mount(&mock_server)
            .await;
        // a regular file where the temp directory should be
        let blocker = tempfile::NamedTempFile::new().unwrap();

        let (gateway, mut rx) = RecordingGateway::new();
        let service = VideoService::new(fetcher(mock_server.uri(), blocker.path()), Arc::new(gateway), true);
        service.run(job()).await;

        match rx.recv().await.unwrap() {
            Sent::Text { text, .. } => {
                assert!(
                    text.starts_with("❌ Failed to download TikTok video: failed to create temp file:"),
                    "{}",
                    text
                );
            }
            other => panic!("expected text, got {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_error_status_body_still_delivered() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_bytes(b"oops".to_vec()))
            .mount(&mock_server)
            .await;
        let dir = tempfile::tempdir().unwrap();

        let (gateway, mut rx) = RecordingGateway::new();
        let service = VideoService::new(fetcher(mock_server.uri(), dir.path()), Arc::new(gateway), true);
        service.run(job()).await;

        assert!(matches!(rx.recv().await.unwrap(), Sent::Video { existed: true, .. }));
        match rx.recv().await.unwrap() {
            Sent::Text { text, .. } => assert_eq!(text, "✅ Successfully downloaded and sent TikTok video!"),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_failure_keeps_file_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let (gateway, mut rx) = RecordingGateway::failing_media();
        // unreachable service degrades to a placeholder, then the upload fails
        let service = VideoService::new(
            fetcher("http://127.0.0.1:1/".to_string(), dir.path()),
            Arc::new(gateway),
            true,
        );
        service.run(job()).await;

        assert!(matches!(rx.recv().await.unwrap(), Sent::Video { .. }));
        match rx.recv().await.unwrap() {
            Sent::Text { text, .. } => assert!(text.starts_with("❌ Failed to send video:"), "{}", text),
            other => panic!("expected text, got {:?}", other),
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_disabled_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let (gateway, mut rx) = RecordingGateway::new();
        let service = VideoService::new(
            fetcher("http://127.0.0.1:1/".to_string(), dir.path()),
            Arc::new(gateway),
            false,
        );
        service.run(job()).await;

        assert!(matches!(rx.recv().await.unwrap(), Sent::Video { .. }));
        assert!(matches!(rx.recv().await.unwrap(), Sent::Text { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_spawn_without_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let (gateway, _rx) = RecordingGateway::new();
        let service = Arc::new(VideoService::new(
            fetcher("http://127.0.0.1:1/".to_string(), dir.path()),
            Arc::new(gateway),
            true,
        ));
        assert!(service.spawn(job()).is_none());
    }
}
