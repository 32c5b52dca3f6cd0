use super::SenderId;
use chrono::{DateTime, Utc};

/// A text message received from the transport
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub text: String,
    pub sender: SenderId,
    /// Sent by the bound account itself (echo of our own outbound traffic)
    pub from_self: bool,
    pub timestamp: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(sender: SenderId, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            from_self: false,
            timestamp: Utc::now(),
        }
    }

    pub fn from_self(mut self) -> Self {
        self.from_self = true;
        self
    }
}
