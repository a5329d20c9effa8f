//! In-memory InviterStatsRepository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use herald_core::entities::InviterStats;
use herald_core::traits::{InviterStatsRepository, RepoResult};
use herald_core::value_objects::Snowflake;

/// In-memory inviter counters
#[derive(Default)]
pub struct MemoryInviterStatsRepository {
    stats: RwLock<HashMap<Snowflake, InviterStats>>,
}

impl MemoryInviterStatsRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InviterStatsRepository for MemoryInviterStatsRepository {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<InviterStats>> {
        let stats = self.stats.read().await;
        Ok(stats.get(&user_id).cloned())
    }

    async fn record_join(&self, inviter_id: Snowflake, fake: bool) -> RepoResult<()> {
        let mut stats = self.stats.write().await;
        stats
            .entry(inviter_id)
            .or_insert_with(|| InviterStats::new(inviter_id))
            .record_join(fake);
        Ok(())
    }

    async fn record_leave(&self, inviter_id: Snowflake) -> RepoResult<bool> {
        let mut stats = self.stats.write().await;
        Ok(match stats.get_mut(&inviter_id) {
            Some(record) => {
                record.record_leave();
                true
            }
            None => false,
        })
    }
}
