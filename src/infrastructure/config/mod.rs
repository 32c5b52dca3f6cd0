//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub video: VideoConfig,
    pub api: ApiConfig,
    pub hub: HubConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Account this process is bound to; stamped on notifications and
    /// required on control API requests when set
    pub instance_user_id: Option<String>,
    /// Identity used for lines typed into the console adapter
    pub console_sender: String,
}

/// Video link download settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct VideoConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub quality: String,
    pub format: String,
    pub temp_dir: PathBuf,
    pub cleanup_after_send: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ApiConfig {
    pub enabled: bool,
    pub addr: String,
    /// Bound on downloading `url` media for the send endpoints
    pub media_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HubConfig {
    /// Per-observer queue depth; an observer that falls this far behind is dropped
    pub observer_buffer: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "relay-bot".to_string(),
            instance_user_id: None,
            console_sender: "console@localhost".to_string(),
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.dummy-video-downloader.com/download".to_string(),
            api_key: None,
            timeout_seconds: 30,
            quality: "720p".to_string(),
            format: "mp4".to_string(),
            temp_dir: PathBuf::from("./tmp"),
            cleanup_after_send: true,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            addr: "0.0.0.0:8080".to_string(),
            media_timeout_seconds: 30,
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { observer_buffer: 32 }
    }
}

impl VideoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables. Unparseable or
    /// out-of-range values are ignored and the current value is kept.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| var(key).filter(|v| !v.is_empty());

        if let Some(endpoint) = var("VIDEO_API_ENDPOINT") {
            self.video.endpoint = endpoint;
        }
        if let Some(key) = var("VIDEO_API_KEY") {
            self.video.api_key = Some(key);
        }
        if let Some(timeout) = var("VIDEO_API_TIMEOUT").and_then(|v| v.parse::<u64>().ok()).filter(|t| *t > 0) {
            self.video.timeout_seconds = timeout;
        }
        if let Some(quality) = var("VIDEO_QUALITY") {
            self.video.quality = quality;
        }
        if let Some(format) = var("VIDEO_FORMAT") {
            self.video.format = format;
        }
        if let Some(dir) = var("TEMP_DIR") {
            self.video.temp_dir = PathBuf::from(dir);
        }
        if let Some(cleanup) = var("CLEANUP_AFTER_SEND").and_then(|v| parse_bool(&v)) {
            self.video.cleanup_after_send = cleanup;
        }
        if let Some(enabled) = var("ENABLE_VIDEO_DOWNLOAD").and_then(|v| parse_bool(&v)) {
            self.video.enabled = enabled;
        }
        if let Some(user_id) = var("INSTANCE_USER_ID") {
            self.bot.instance_user_id = Some(user_id);
        }
        if let Some(addr) = var("API_ADDR") {
            self.api.addr = addr;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.video.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("video.timeout-seconds must be > 0".to_string()));
        }
        if self.hub.observer_buffer == 0 {
            return Err(ConfigError::InvalidValue("hub.observer-buffer must be > 0".to_string()));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert!(config.video.enabled);
        assert_eq!(config.video.timeout_seconds, 30);
        assert_eq!(config.video.format, "mp4");
        assert_eq!(config.api.addr, "0.0.0.0:8080");
        assert!(config.bot.instance_user_id.is_none());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "video:\n  quality: 1080p\n  cleanup-after-send: false\nbot:\n  instance-user-id: owner@example.net\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.video.quality, "1080p");
        assert!(!config.video.cleanup_after_send);
        assert_eq!(config.video.format, "mp4");
        assert_eq!(config.bot.instance_user_id.as_deref(), Some("owner@example.net"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = Config::from_yaml("video:\n  timeout-seconds: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VIDEO_API_ENDPOINT", "http://localhost:9000/dl"),
            ("VIDEO_API_TIMEOUT", "5"),
            ("ENABLE_VIDEO_DOWNLOAD", "false"),
            ("CLEANUP_AFTER_SEND", "not-a-bool"),
            ("API_ADDR", "127.0.0.1:3001"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_vars(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.video.endpoint, "http://localhost:9000/dl");
        assert_eq!(config.video.timeout_seconds, 5);
        assert!(!config.video.enabled);
        // unparseable value keeps the default
        assert!(config.video.cleanup_after_send);
        assert_eq!(config.api.addr, "127.0.0.1:3001");
    }

    #[test]
    fn test_env_zero_timeout_ignored() {
        let mut config = Config::from_yaml("video:\n  timeout-seconds: 12\n").unwrap();
        config.apply_vars(|k| (k == "VIDEO_API_TIMEOUT").then(|| "0".to_string()));

        assert_eq!(config.video.timeout_seconds, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("cleanup-after-send"));
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.video.endpoint, Config::default().video.endpoint);
    }
}
