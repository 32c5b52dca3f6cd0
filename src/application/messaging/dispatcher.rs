//! Message dispatcher - Routes text to a command or to the auto-reply classifier

use std::sync::Arc;

use super::parser::{parse, Parsed};
use super::Reply;
use crate::application::autoreply::AutoReplyClassifier;
use crate::application::services::video_service::{VideoJob, VideoService};
use crate::domain::entities::{CommandContext, CommandRegistry, SenderId};

pub const NOT_UNDERSTOOD: &str = "🤔 I didn't understand that. Type /help for available commands.";

/// Single entry point for inbound text.
///
/// The registry is fixed at construction and read without locking.
pub struct MessageDispatcher {
    registry: CommandRegistry,
    classifier: AutoReplyClassifier,
    videos: Option<Arc<VideoService>>,
}

impl MessageDispatcher {
    pub fn new(registry: CommandRegistry, classifier: AutoReplyClassifier) -> Self {
        Self {
            registry,
            classifier,
            videos: None,
        }
    }

    pub fn with_video_service(mut self, videos: Arc<VideoService>) -> Self {
        self.videos = Some(videos);
        self
    }

    /// Compute the reply, launching any side effect immediately.
    ///
    /// The video job is already running when this returns, so its status
    /// message can reach the sender before the caller sends the returned
    /// acknowledgement. Callers that must deliver the reply first use
    /// [`route`](Self::route) and [`launch`](Self::launch) instead.
    pub fn dispatch(&self, raw: &str, sender: &SenderId) -> String {
        let reply = self.route(raw, sender);
        if let Some(job) = reply.job {
            self.launch(job);
        }
        reply.text
    }

    /// Compute the reply, leaving any side effect for the caller to [`launch`](Self::launch)
    pub fn route(&self, raw: &str, sender: &SenderId) -> Reply {
        match parse(raw) {
            Parsed::Empty => Reply::text(NOT_UNDERSTOOD),
            Parsed::Text(text) => self.classifier.classify(text, sender),
            Parsed::Command { name, args } => {
                let Some(cmd) = self.registry.get(&name) else {
                    // unknown commands are ignored, not answered
                    tracing::debug!("Unknown command {} from {}", name, sender);
                    return Reply::none();
                };

                let ctx = CommandContext::new(args, sender.clone());
                match cmd.execute(&ctx) {
                    Ok(output) => Reply::text(output),
                    Err(e) => {
                        tracing::warn!("Command {} failed for {}: {}", name, sender, e);
                        Reply::text(format!("❌ {}", e))
                    }
                }
            }
        }
    }

    pub fn launch(&self, job: VideoJob) {
        match &self.videos {
            Some(videos) => {
                videos.spawn(job);
            }
            None => tracing::warn!("Video service not configured, ignoring {} link", job.link.platform),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::autoreply::classifier::{FALLBACK_REPLIES, VIDEO_ACK};
    use crate::application::errors::CommandError;
    use crate::domain::entities::Command;

    fn sender() -> SenderId {
        SenderId::parse("alice@example.net").unwrap()
    }

    fn dispatcher() -> MessageDispatcher {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("/ping", |_| Ok("PONG".to_string())));
        registry.register(Command::new("/echo", |ctx| Ok(ctx.args.join(" "))));
        registry.register(Command::new("/fail", |_| {
            Err(CommandError::InvalidArgs("need more".to_string()))
        }));
        MessageDispatcher::new(registry, AutoReplyClassifier::new(true))
    }

    #[test]
    fn test_registered_command_output_verbatim() {
        let d = dispatcher();
        assert_eq!(d.dispatch("/ping", &sender()), "PONG");
        assert_eq!(d.dispatch("  /PING  ", &sender()), "PONG");
        assert_eq!(d.dispatch("/echo Mixed Case", &sender()), "Mixed Case");
    }

    #[test]
    fn test_unknown_command_is_silent() {
        let d = dispatcher();
        assert_eq!(d.dispatch("/nosuchcmd foo", &sender()), "");
        assert_eq!(d.dispatch("/", &sender()), "");
        assert!(d.route("/nosuchcmd", &sender()).is_silent());
    }

    #[test]
    fn test_whitespace_only_not_understood() {
        assert_eq!(dispatcher().dispatch("   ", &sender()), NOT_UNDERSTOOD);
    }

    #[test]
    fn test_free_text_goes_to_classifier() {
        let d = dispatcher();
        let reply = d.dispatch("hello there", &sender());
        assert!(reply.starts_with("👋 Hello!"));

        let reply = d.dispatch("zzz", &sender());
        assert!(FALLBACK_REPLIES.contains(&reply.as_str()));
    }

    #[test]
    fn test_command_error_rendered_with_indicator() {
        assert_eq!(dispatcher().dispatch("/fail", &sender()), "❌ Invalid arguments: need more");
    }

    #[test]
    fn test_route_hands_back_video_job() {
        let reply = dispatcher().route("https://youtu.be/abc123XYZ", &sender());
        assert_eq!(reply.text, VIDEO_ACK);
        assert!(reply.job.is_some());
    }

    #[tokio::test]
    async fn test_route_defers_job_until_launch() {
        use crate::domain::traits::gateway::recording::{RecordingGateway, Sent};
        use crate::infrastructure::config::VideoConfig;
        use crate::infrastructure::fetch::FetchClient;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = FetchClient::new(VideoConfig {
            endpoint: "http://127.0.0.1:1/".to_string(),
            temp_dir: dir.path().to_path_buf(),
            ..VideoConfig::default()
        })
        .unwrap();
        let (gateway, mut sent) = RecordingGateway::new();
        let videos = Arc::new(VideoService::new(fetcher, Arc::new(gateway), true));
        let d = dispatcher().with_video_service(videos);

        let reply = d.route("https://youtu.be/abc123XYZ", &sender());
        tokio::task::yield_now().await;
        assert!(sent.try_recv().is_err());

        d.launch(reply.job.unwrap());
        assert!(matches!(sent.recv().await.unwrap(), Sent::Video { .. }));
        assert!(matches!(sent.recv().await.unwrap(), Sent::Text { .. }));
    }

    #[test]
    fn test_dispatch_without_video_service_still_acknowledges() {
        assert_eq!(dispatcher().dispatch("https://youtu.be/abc123XYZ", &sender()), VIDEO_ACK);
    }
}
