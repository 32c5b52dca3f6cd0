//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Outbound send errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("file not found: {0}")]
    MissingFile(String),

    #[error("{0} sender not configured")]
    NotConfigured(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Video fetch pipeline errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("fetch service timed out after {0}s")]
    Timeout(u64),

    #[error("fetch service returned status {0}")]
    Status(u16),

    #[error("failed to read response: {0}")]
    Body(String),

    #[error("failed to create temp file: {0}")]
    TempFile(std::io::Error),

    #[error("failed to save video: {0}")]
    Write(std::io::Error),

    #[error("failed to create placeholder video: {0}")]
    Placeholder(std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
