use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::{InboundMessage, NotificationEvent};
use crate::domain::traits::{EventSink, OutboundGateway};

/// Service for processing inbound messages: reply, then mirror to observers
pub struct MessageService {
    dispatcher: Arc<MessageDispatcher>,
    gateway: Arc<dyn OutboundGateway>,
    events: Arc<dyn EventSink>,
    instance_user_id: Option<String>,
}

impl MessageService {
    pub fn new(
        dispatcher: Arc<MessageDispatcher>,
        gateway: Arc<dyn OutboundGateway>,
        events: impl EventSink + 'static,
    ) -> Self {
        Self {
            dispatcher,
            gateway,
            events: Arc::new(events),
            instance_user_id: None,
        }
    }

    pub fn with_instance_user_id(mut self, user_id: Option<String>) -> Self {
        self.instance_user_id = user_id.filter(|id| !id.is_empty());
        self
    }

    /// Process an incoming message.
    ///
    /// The reply is sent before any video job starts, so the acknowledgement
    /// always reaches the sender ahead of the job's status message.
    pub async fn handle(&self, message: InboundMessage) -> Result<(), BotError> {
        if message.from_self {
            tracing::debug!("Ignoring own message {}", message.id);
            return Ok(());
        }

        let text = message.text.trim();
        tracing::info!("Received message from {}: {}", message.sender, text);

        let reply = self.dispatcher.route(text, &message.sender);
        let mut result = Ok(());

        if !reply.is_silent() {
            let preview: String = reply.text.chars().take(100).collect();
            tracing::info!("Sending response to {}: {}", message.sender, preview);
            if let Err(e) = self.gateway.send_text(&message.sender, &reply.text).await {
                tracing::error!("Failed to send reply to {}: {}", message.sender, e);
                result = Err(BotError::Gateway(e));
            }
        }

        if let Some(job) = reply.job {
            self.dispatcher.launch(job);
        }

        self.broadcast_incoming(NotificationEvent::message(message.sender.to_string(), text));
        result
    }

    /// Push an event to observers, stamped with the bound instance when there is one
    pub fn broadcast_incoming(&self, mut event: NotificationEvent) {
        if let Some(user_id) = &self.instance_user_id {
            event.user_id = Some(user_id.clone());
        }
        self.events.publish(event);
    }
}
