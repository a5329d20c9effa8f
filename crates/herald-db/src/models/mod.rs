//! Database models - SQLx-compatible structs for PostgreSQL tables

mod connection;
mod giveaway;
mod inviter_stats;

pub use connection::ConnectionModel;
pub use giveaway::GiveawayModel;
pub use inviter_stats::InviterStatsModel;
