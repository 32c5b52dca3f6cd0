//! Domain traits - Abstractions for infrastructure implementations

pub mod fetcher;
pub mod gateway;
pub mod notifier;

pub use fetcher::VideoFetcher;
pub use gateway::OutboundGateway;
pub use notifier::EventSink;
