//! # herald-gateway
//!
//! Bot runtime: gateway event translation, the dispatch table, the Discord
//! adapter, and the health web view.

pub mod events;
pub mod handlers;
pub mod platform;
pub mod server;

pub use handlers::{DispatchSettings, EventDispatcher, HandlerError, Reply};
pub use server::{create_app, run, BotStatus, HealthState};
