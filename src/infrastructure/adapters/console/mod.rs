//! Console adapter for development/testing

use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::GatewayError;
use crate::domain::entities::{InboundMessage, SenderId};
use crate::domain::traits::OutboundGateway;

/// Console gateway for local development: sends are printed to stdout
#[derive(Debug, Default)]
pub struct ConsoleGateway;

impl ConsoleGateway {
    pub fn new() -> Self {
        Self
    }

    async fn ensure_file(path: &Path) -> Result<(), GatewayError> {
        if tokio::fs::try_exists(path).await? {
            Ok(())
        } else {
            Err(GatewayError::MissingFile(path.display().to_string()))
        }
    }
}

#[async_trait]
impl OutboundGateway for ConsoleGateway {
    async fn send_text(&self, to: &SenderId, text: &str) -> Result<(), GatewayError> {
        println!("[BOT -> {}] {}", to, text);
        Ok(())
    }

    async fn send_image(&self, to: &SenderId, path: &Path, caption: &str) -> Result<(), GatewayError> {
        Self::ensure_file(path).await?;
        println!("[BOT -> {}] [Image {}] {}", to, path.display(), caption);
        Ok(())
    }

    async fn send_video(&self, to: &SenderId, path: &Path, caption: &str) -> Result<(), GatewayError> {
        Self::ensure_file(path).await?;
        println!("[BOT -> {}] [Video {}] {}", to, path.display(), caption);
        Ok(())
    }

    async fn send_document(&self, to: &SenderId, path: &Path, title: &str) -> Result<(), GatewayError> {
        Self::ensure_file(path).await?;
        println!("[BOT -> {}] [Document {}] {}", to, path.display(), title);
        Ok(())
    }
}

/// Read stdin line by line, forwarding each non-empty line as a message
/// from `sender`. Returns when stdin closes or the receiver is dropped.
pub async fn read_stdin(sender: SenderId, tx: mpsc::Sender<InboundMessage>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                if tx.send(InboundMessage::new(sender.clone(), line)).await.is_err() {
                    break;
                }
            }
            Ok(None) => {
                tracing::info!("Console input closed");
                break;
            }
            Err(e) => {
                tracing::error!("Failed to read console input: {}", e);
                break;
            }
        }
    }
}
