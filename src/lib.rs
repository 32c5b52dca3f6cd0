//! Relay bot: command and auto-reply responder with a video link pipeline,
//! an observer notification hub and an HTTP control API.

pub mod application;
pub mod domain;
pub mod infrastructure;
