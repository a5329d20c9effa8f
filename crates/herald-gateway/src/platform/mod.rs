//! Discord adapter
//!
//! The serenity event handler feeding the dispatcher, the `ChatPlatform`
//! implementation, and message rendering.

mod discord;
mod handler;
pub mod render;

pub use discord::{platform_id, snowflake, SerenityPlatform};
pub use handler::BotHandler;
