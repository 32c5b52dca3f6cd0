//! Control API - HTTP send endpoints, health/control routes and the `/ws`
//! notification stream

pub mod error;
pub mod media;
pub mod models;
mod routes;
mod ws;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tokio::sync::broadcast;

use crate::application::errors::BotError;
use crate::domain::traits::OutboundGateway;
use crate::infrastructure::config::ApiConfig;
use crate::infrastructure::hub::HubHandle;

pub use error::ApiError;

/// Shared state for every control API handler
#[derive(Clone)]
pub struct ApiState {
    pub gateway: Arc<dyn OutboundGateway>,
    pub hub: HubHandle,
    /// When set, send requests must carry this `user_id`
    pub instance_user_id: Option<String>,
    pub started: Instant,
    pub temp_dir: PathBuf,
    media_client: Client,
    media_timeout_seconds: u64,
    shutdown: broadcast::Sender<()>,
}

impl ApiState {
    pub fn new(
        gateway: Arc<dyn OutboundGateway>,
        hub: HubHandle,
        config: &ApiConfig,
        temp_dir: PathBuf,
        shutdown: broadcast::Sender<()>,
    ) -> Result<Self, BotError> {
        let media_client = Client::builder()
            .timeout(Duration::from_secs(config.media_timeout_seconds))
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self {
            gateway,
            hub,
            instance_user_id: None,
            started: Instant::now(),
            temp_dir,
            media_client,
            media_timeout_seconds: config.media_timeout_seconds,
            shutdown,
        })
    }

    pub fn with_instance_user_id(mut self, user_id: Option<String>) -> Self {
        self.instance_user_id = user_id.filter(|id| !id.is_empty());
        self
    }
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/send/text", post(routes::send_text))
        .route("/api/send/image", post(routes::send_image))
        .route("/api/send/video", post(routes::send_video))
        .route("/api/send/document", post(routes::send_document))
        .route("/api/health", get(routes::health))
        .route("/api/control/status", get(routes::control_status))
        .route("/api/control/stop", post(routes::control_stop))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
}

/// Serve the control API until `shutdown` fires
pub async fn serve(addr: &str, state: ApiState, mut shutdown: broadcast::Receiver<()>) -> Result<(), BotError> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Control API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Control API shutting down");
        })
        .await?;

    Ok(())
}
