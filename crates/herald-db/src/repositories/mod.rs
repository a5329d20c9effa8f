//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in herald-core.
//! Each repository handles database operations for a specific domain entity.

mod connection;
mod error;
mod giveaway;
mod inviter_stats;

pub use connection::PgConnectionRepository;
pub use giveaway::PgGiveawayRepository;
pub use inviter_stats::PgInviterStatsRepository;
