//! # herald-core
//!
//! Domain layer containing entities, value objects, repository traits and the
//! chat-platform port. This crate has zero dependencies on infrastructure
//! (database, platform SDK, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    is_fake_account, parse_positive, Connection, EntryOutcome, Giveaway, GiveawayDraft,
    GiveawayOutcome, GiveawayStatus, InviteSnapshot, InviteUsage, InviterStats,
    DEFAULT_DURATION_MINUTES, DEFAULT_WINNER_COUNT, FAKE_ACCOUNT_AGE_DAYS,
};
pub use error::DomainError;
pub use traits::{
    ChatPlatform, ConnectionRepository, GiveawayRepository, InviterStatsRepository, RepoResult,
};
pub use value_objects::{Snowflake, SnowflakeParseError};
