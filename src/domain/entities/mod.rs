//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod event;
pub mod message;
pub mod sender;

pub use command::{Command, CommandContext, CommandRegistry, COMMAND_PREFIX};
pub use event::NotificationEvent;
pub use message::InboundMessage;
pub use sender::{InvalidSenderId, SenderId};
