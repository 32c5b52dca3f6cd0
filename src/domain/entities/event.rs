use serde::{Deserialize, Serialize};

/// Event kind used when mirroring an inbound text message
pub const MESSAGE_EVENT: &str = "message";

/// Notification pushed to connected observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_type: Option<String>,
    /// Owning bot instance, when the process is bound to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl NotificationEvent {
    pub fn new(from: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            text: None,
            event: event.into(),
            raw_type: None,
            user_id: None,
        }
    }

    pub fn message(from: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(from, MESSAGE_EVENT).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}
