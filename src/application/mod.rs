//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Business logic orchestration
//! - Autoreply: Keyword classifier and video link patterns
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and dispatching

pub mod autoreply;
pub mod errors;
pub mod messaging;
pub mod services;
