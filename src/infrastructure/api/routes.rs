use std::path::{Path, PathBuf};

use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::media::download_to_temp;
use super::models::{ControlResponse, HealthResponse, SendMediaRequest, SendTextRequest, StatusResponse};
use super::ApiState;
use crate::application::errors::GatewayError;
use crate::application::services::command_service::format_uptime;
use crate::domain::entities::SenderId;

#[derive(Debug, Clone, Copy)]
enum MediaKind {
    Image,
    Video,
    Document,
}

pub async fn send_text(State(state): State<ApiState>, body: Bytes) -> Result<Json<StatusResponse>, ApiError> {
    let req: SendTextRequest = parse_body(&body)?;
    state.authorize(req.user_id.as_deref())?;
    let to = parse_jid(&req.jid)?;

    state.gateway.send_text(&to, &req.text).await.map_err(send_failed)?;
    tracing::info!("API sent text to {}", to);
    Ok(Json(StatusResponse::ok()))
}

pub async fn send_image(State(state): State<ApiState>, body: Bytes) -> Result<Json<StatusResponse>, ApiError> {
    send_media(&state, &body, MediaKind::Image).await
}

pub async fn send_video(State(state): State<ApiState>, body: Bytes) -> Result<Json<StatusResponse>, ApiError> {
    send_media(&state, &body, MediaKind::Video).await
}

pub async fn send_document(State(state): State<ApiState>, body: Bytes) -> Result<Json<StatusResponse>, ApiError> {
    send_media(&state, &body, MediaKind::Document).await
}

async fn send_media(state: &ApiState, body: &[u8], kind: MediaKind) -> Result<Json<StatusResponse>, ApiError> {
    let req: SendMediaRequest = parse_body(body)?;
    state.authorize(req.user_id.as_deref())?;
    let to = parse_jid(&req.jid)?;

    let local = req.file.as_deref().filter(|f| !f.is_empty());
    let remote = req.url.as_deref().filter(|u| !u.is_empty());

    let (path, downloaded) = match (local, remote) {
        (Some(file), _) => (PathBuf::from(file), false),
        (None, Some(url)) => {
            let path = download_to_temp(&state.media_client, url, &state.temp_dir, state.media_timeout_seconds)
                .await
                .map_err(|e| ApiError::internal(format!("download failed: {}", e)))?;
            (path, true)
        }
        (None, None) => (PathBuf::new(), false),
    };

    let result = deliver(state, &to, &path, &req, kind).await;

    if downloaded {
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }

    result.map_err(send_failed)?;
    tracing::info!("API sent {:?} to {}", kind, to);
    Ok(Json(StatusResponse::ok()))
}

async fn deliver(
    state: &ApiState,
    to: &SenderId,
    path: &Path,
    req: &SendMediaRequest,
    kind: MediaKind,
) -> Result<(), GatewayError> {
    let caption = req.caption.as_deref().unwrap_or_default();
    match kind {
        MediaKind::Image => state.gateway.send_image(to, path, caption).await,
        MediaKind::Video => state.gateway.send_video(to, path, caption).await,
        MediaKind::Document => {
            let title = req.title.as_deref().unwrap_or_default();
            state.gateway.send_document(to, path, title).await
        }
    }
}

pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        uptime: format_uptime(state.started.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn control_status() -> Json<ControlResponse> {
    Json(ControlResponse {
        message: "Bot is running".to_string(),
        success: true,
    })
}

pub async fn control_stop(State(state): State<ApiState>) -> Json<ControlResponse> {
    tracing::info!("Stop requested through control API");
    if state.shutdown.send(()).is_err() {
        tracing::warn!("No shutdown listener registered");
    }

    Json(ControlResponse {
        message: "Bot stopping...".to_string(),
        success: true,
    })
}

impl ApiState {
    fn authorize(&self, user_id: Option<&str>) -> Result<(), ApiError> {
        let Some(expected) = &self.instance_user_id else {
            return Ok(());
        };

        match user_id.filter(|id| !id.is_empty()) {
            None => Err(ApiError::bad_request("user_id required")),
            Some(id) if id != expected => Err(ApiError::forbidden("user_id mismatch")),
            Some(_) => Ok(()),
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected API payload: {}", e);
        ApiError::bad_request("invalid json payload")
    })
}

fn parse_jid(jid: &str) -> Result<SenderId, ApiError> {
    SenderId::parse(jid).map_err(|_| ApiError::bad_request("invalid jid"))
}

fn send_failed(e: GatewayError) -> ApiError {
    tracing::error!("API send failed: {}", e);
    ApiError::internal(format!("send failed: {}", e))
}
