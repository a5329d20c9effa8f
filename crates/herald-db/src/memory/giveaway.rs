//! In-memory GiveawayRepository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use herald_core::entities::{EntryOutcome, Giveaway};
use herald_core::error::DomainError;
use herald_core::traits::{GiveawayRepository, RepoResult};
use herald_core::value_objects::Snowflake;

/// In-memory giveaway store
///
/// Every operation runs under the write lock, which gives the same
/// check-and-set guarantees as the conditional SQL updates.
#[derive(Default)]
pub struct MemoryGiveawayRepository {
    giveaways: RwLock<HashMap<Snowflake, Giveaway>>,
}

impl MemoryGiveawayRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GiveawayRepository for MemoryGiveawayRepository {
    async fn find_by_id(&self, message_id: Snowflake) -> RepoResult<Option<Giveaway>> {
        let giveaways = self.giveaways.read().await;
        Ok(giveaways.get(&message_id).cloned())
    }

    async fn create(&self, giveaway: &Giveaway) -> RepoResult<()> {
        let mut giveaways = self.giveaways.write().await;
        if giveaways.contains_key(&giveaway.message_id) {
            return Err(DomainError::GiveawayExists(giveaway.message_id));
        }
        giveaways.insert(giveaway.message_id, giveaway.clone());
        Ok(())
    }

    async fn add_participant(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<EntryOutcome> {
        let mut giveaways = self.giveaways.write().await;
        let Some(giveaway) = giveaways.get_mut(&message_id) else {
            return Ok(EntryOutcome::NotFound);
        };

        Ok(match giveaway.enter(user_id) {
            Ok(participants) => EntryOutcome::Entered { participants },
            Err(DomainError::AlreadyEnded) => EntryOutcome::Ended,
            Err(DomainError::DuplicateEntry) => EntryOutcome::Duplicate,
            Err(other) => return Err(other),
        })
    }

    async fn find_due(&self, now_unix: i64) -> RepoResult<Vec<Giveaway>> {
        let giveaways = self.giveaways.read().await;
        let mut due: Vec<Giveaway> = giveaways
            .values()
            .filter(|giveaway| giveaway.is_due(now_unix))
            .cloned()
            .collect();
        due.sort_by_key(|giveaway| giveaway.end_time_unix);
        Ok(due)
    }

    async fn finish(&self, message_id: Snowflake, winners: &[Snowflake]) -> RepoResult<bool> {
        let mut giveaways = self.giveaways.write().await;
        Ok(match giveaways.get_mut(&message_id) {
            Some(giveaway) => giveaway.finish(winners.to_vec()).is_ok(),
            None => false,
        })
    }
}
