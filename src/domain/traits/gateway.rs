use std::path::Path;

use async_trait::async_trait;

use crate::application::errors::GatewayError;
use crate::domain::entities::SenderId;

/// Outbound gateway - abstraction over the messaging transport's send primitives.
///
/// A failed send is terminal for that message; callers report it and move on.
#[async_trait]
pub trait OutboundGateway: Send + Sync {
    /// Send a plain text message
    async fn send_text(&self, to: &SenderId, text: &str) -> Result<(), GatewayError>;

    /// Upload and send an image file with a caption
    async fn send_image(&self, to: &SenderId, path: &Path, caption: &str) -> Result<(), GatewayError>;

    /// Upload and send a video file with a caption
    async fn send_video(&self, to: &SenderId, path: &Path, caption: &str) -> Result<(), GatewayError>;

    /// Upload and send a file as a document
    async fn send_document(&self, to: &SenderId, path: &Path, title: &str) -> Result<(), GatewayError>;
}
