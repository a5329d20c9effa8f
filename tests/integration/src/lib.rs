//! Integration test utilities for the bot
//!
//! Drives the dispatch table end to end over the in-memory store and a
//! recording platform, and serves the health view on a real socket.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
