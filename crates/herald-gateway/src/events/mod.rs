//! Bot events
//!
//! Platform callbacks are translated into these values before they reach
//! the dispatch table.

mod event_types;
mod payloads;

pub mod ids;

pub use event_types::BotEventType;
pub use payloads::{
    BotEvent, ButtonEvent, CommandEvent, MemberAddEvent, MemberRemoveEvent, ModalSubmitEvent,
    ReadyEvent,
};
