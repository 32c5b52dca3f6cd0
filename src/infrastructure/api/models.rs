//! JSON bodies of the control API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SendTextRequest {
    pub jid: String,
    pub text: String,
    pub user_id: Option<String>,
}

/// Media send request. `file` is a local path; when it is empty and `url`
/// is set the server downloads the URL first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SendMediaRequest {
    pub jid: String,
    pub url: Option<String>,
    pub file: Option<String>,
    pub caption: Option<String>,
    /// Document title
    pub title: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlResponse {
    pub message: String,
    pub success: bool,
}
