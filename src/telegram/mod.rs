//! Telegram Bot API transport.

pub mod api;
pub mod polling;
pub mod sink;
pub mod types;

pub use api::TelegramApi;
pub use polling::{Envelope, run_polling_loop};
pub use sink::TelegramSink;
