//! Domain entities - core business objects

mod connection;
mod giveaway;
mod invite;
mod inviter_stats;

pub use connection::Connection;
pub use giveaway::{
    parse_positive, EntryOutcome, Giveaway, GiveawayDraft, GiveawayOutcome, GiveawayStatus,
    DEFAULT_DURATION_MINUTES, DEFAULT_WINNER_COUNT,
};
pub use invite::{InviteSnapshot, InviteUsage};
pub use inviter_stats::{is_fake_account, InviterStats, FAKE_ACCOUNT_AGE_DAYS};
