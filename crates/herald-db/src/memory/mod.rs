//! In-memory repository implementations
//!
//! Same semantics as the PostgreSQL repositories, data lives only as long as
//! the process. Used by tests and by local runs without a database.

mod connection;
mod giveaway;
mod inviter_stats;

pub use connection::MemoryConnectionRepository;
pub use giveaway::MemoryGiveawayRepository;
pub use inviter_stats::MemoryInviterStatsRepository;
