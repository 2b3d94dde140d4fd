pub mod handler;
pub mod message;
pub mod sink;
pub mod worker;

pub use handler::MessageHandler;
pub use message::{InboundMessage, PhotoRef};
pub use sink::{ReplySink, deliver};
pub use worker::{BotSupervisor, SupervisorConfig};
