//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (SenderId, InboundMessage, Command, NotificationEvent)
//! - Traits: Abstractions for infrastructure (OutboundGateway)

pub mod entities;
pub mod traits;
