//! Message handling - parsing and dispatching inbound text

pub mod dispatcher;
pub mod parser;
pub mod reply;

pub use dispatcher::MessageDispatcher;
pub use reply::Reply;
