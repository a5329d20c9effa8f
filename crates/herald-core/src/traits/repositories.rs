//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every write the engine performs is one of
//! find-by-key, upsert-with-increment, conditional update or insert.

use async_trait::async_trait;

use crate::entities::{Connection, EntryOutcome, Giveaway, InviterStats};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Inviter Statistics Repository
// ============================================================================

#[async_trait]
pub trait InviterStatsRepository: Send + Sync {
    /// Find the counters of an inviter
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<InviterStats>>;

    /// Atomically add one join (and one fake if `fake`), creating the record
    /// on first use
    async fn record_join(&self, inviter_id: Snowflake, fake: bool) -> RepoResult<()>;

    /// Atomically add one leave. Returns false when the inviter has no record.
    async fn record_leave(&self, inviter_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Connection Repository (invite ledger)
// ============================================================================

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Find who invited a user
    async fn find_by_invited(&self, invited_id: Snowflake) -> RepoResult<Option<Connection>>;

    /// Insert or overwrite the inviter of a user
    async fn upsert(&self, connection: &Connection) -> RepoResult<()>;
}

// ============================================================================
// Giveaway Repository
// ============================================================================

#[async_trait]
pub trait GiveawayRepository: Send + Sync {
    /// Find giveaway by announcement message ID
    async fn find_by_id(&self, message_id: Snowflake) -> RepoResult<Option<Giveaway>>;

    /// Insert a new giveaway
    async fn create(&self, giveaway: &Giveaway) -> RepoResult<()>;

    /// Append a participant only if the giveaway is active and the user has
    /// not entered yet
    async fn add_participant(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<EntryOutcome>;

    /// Active giveaways whose end time is at or before `now_unix`
    async fn find_due(&self, now_unix: i64) -> RepoResult<Vec<Giveaway>>;

    /// Mark ended with the drawn winners, only if still active.
    /// Returns false when someone else already ended it.
    async fn finish(&self, message_id: Snowflake, winners: &[Snowflake]) -> RepoResult<bool>;
}
