//! Chat platform port
//!
//! The only calls the engine makes back into the chat platform. Gateway
//! events flow the other way and never reach this crate directly.

use async_trait::async_trait;

use crate::entities::{GiveawayOutcome, InviteUsage};
use crate::traits::RepoResult;
use crate::value_objects::Snowflake;

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Current invite links of a guild with their use counters
    async fn fetch_invites(&self, guild_id: Snowflake) -> RepoResult<Vec<InviteUsage>>;

    /// Show the winners on the announcement and congratulate them
    ///
    /// Fails with `CollaboratorUnavailable` when the channel or message is gone.
    async fn publish_giveaway_result(&self, outcome: &GiveawayOutcome) -> RepoResult<()>;
}
