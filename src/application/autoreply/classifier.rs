//! Keyword auto-replies for free text

use chrono::Utc;

use super::patterns::VideoLinkDetector;
use crate::application::messaging::Reply;
use crate::application::services::video_service::VideoJob;
use crate::domain::entities::SenderId;

pub const VIDEO_ACK: &str = "🎥 Video link detected! I'm downloading and processing it for you. Please wait...";

/// One keyword category: any phrase contained in the input selects `reply`
struct Rule {
    phrases: &'static [&'static str],
    reply: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        phrases: &["hello", "hi", "hey", "good morning", "good afternoon", "good evening", "good night"],
        reply: "👋 Hello! How can I help you today? Type /help to see available commands.",
    },
    Rule {
        phrases: &["how are you", "how do you do", "what's up", "whats up", "wassup"],
        reply: "😊 I'm doing great, thank you for asking! I'm here and ready to help. How about you?",
    },
    Rule {
        phrases: &["who are you", "what are you", "who is this", "what is this"],
        reply: "🤖 I'm a chat bot built with Rust! I can help you with various commands and tasks. Type /help to see what I can do!",
    },
    Rule {
        phrases: &["thank you", "thanks", "thx", "thank u"],
        reply: "😊 You're welcome! Happy to help. Is there anything else I can do for you?",
    },
    Rule {
        phrases: &["bye", "goodbye", "see you", "catch you later", "talk to you later", "ttyl"],
        reply: "👋 Goodbye! Have a great day! Feel free to message me anytime you need help.",
    },
    Rule {
        phrases: &["help", "what can you do", "commands", "options"],
        reply: "🆘 I can help you with many things! Type /help to see all available commands, or just chat with me!",
    },
];

pub const FALLBACK_REPLIES: [&str; 3] = [
    "🤔 I'm not sure how to respond to that, but I'm here to help! Type /help for available commands.",
    "💭 Interesting! I'm still learning. Try typing /help to see what I can do for you.",
    "🤖 I didn't quite understand that. Type /help to see my available commands!",
];

/// Answers free text. Never silent: unmatched text gets a fallback reply.
#[derive(Debug, Clone)]
pub struct AutoReplyClassifier {
    detector: VideoLinkDetector,
    video_enabled: bool,
}

impl AutoReplyClassifier {
    pub fn new(video_enabled: bool) -> Self {
        Self {
            detector: VideoLinkDetector::new(),
            video_enabled,
        }
    }

    pub fn classify(&self, text: &str, sender: &SenderId) -> Reply {
        if self.video_enabled {
            if let Some(link) = self.detector.detect(text) {
                tracing::info!("{} link from {}: {}", link.platform, sender, link.url);
                return Reply::text(VIDEO_ACK).with_job(VideoJob::new(link, sender.clone()));
            }
        }

        let lower = text.trim().to_lowercase();
        let reply = RULES
            .iter()
            .find(|rule| rule.phrases.iter().any(|p| lower.contains(p)))
            .map(|rule| rule.reply)
            .unwrap_or_else(|| fallback(Utc::now().timestamp()));

        Reply::text(reply)
    }
}

impl Default for AutoReplyClassifier {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Varies with `seed` but always lands in `FALLBACK_REPLIES`
fn fallback(seed: i64) -> &'static str {
    FALLBACK_REPLIES[seed.rem_euclid(FALLBACK_REPLIES.len() as i64) as usize]
}
