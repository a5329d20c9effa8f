//! Entity to model mappers
//!
//! This module provides conversions between domain entities (herald-core) and database models.
//! - `From<Model> for Entity` / `TryFrom`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod connection;
mod giveaway;
mod inviter_stats;

pub use giveaway::{snowflakes_to_ids, GiveawayInsert};
