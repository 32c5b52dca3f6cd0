//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Fetch: Video fetch service client
//! - Hub: Notification fan-out to observers
//! - Api: Control API and websocket stream
//! - Adapters: Platform integrations (console)

pub mod adapters;
pub mod api;
pub mod config;
pub mod fetch;
pub mod hub;
