//! Per-guild invite snapshots
//!
//! The only in-process state of the bot. Each guild has its own async mutex,
//! held across fetch, diff and refresh so concurrent joins in the same guild
//! are matched one after another against an up-to-date snapshot.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use herald_core::entities::{InviteSnapshot, InviteUsage};
use herald_core::error::DomainError;
use herald_core::traits::ChatPlatform;
use herald_core::Snowflake;

type Slot = Arc<Mutex<Option<InviteSnapshot>>>;

/// What a join did to a guild's invite counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteDiff {
    /// No snapshot existed yet; the fetched list became the baseline
    Primed,
    /// This invite's counter went up
    Used(InviteUsage),
    /// No counter went up
    Unchanged,
}

/// Invite snapshots keyed by guild
#[derive(Clone, Default)]
pub struct InviteCache {
    guilds: Arc<DashMap<Snowflake, Slot>>,
}

impl InviteCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, guild_id: Snowflake) -> Slot {
        // Clone the Arc so the map shard lock is released before any await
        self.guilds.entry(guild_id).or_default().value().clone()
    }

    /// Fetch the guild's invites and store them as the baseline
    ///
    /// Returns the number of invites known after priming.
    #[instrument(skip(self, platform))]
    pub async fn prime(
        &self,
        guild_id: Snowflake,
        platform: &dyn ChatPlatform,
    ) -> Result<usize, DomainError> {
        let slot = self.slot(guild_id);
        let mut snapshot = slot.lock().await;

        let fetched = fetch(guild_id, platform).await?;
        *snapshot = Some(InviteSnapshot::from_usages(&fetched));

        debug!(invites = fetched.len(), "Invite snapshot primed");
        Ok(fetched.len())
    }

    /// Fetch the guild's invites, compare with the snapshot, then refresh it
    ///
    /// A failed fetch leaves the snapshot untouched.
    #[instrument(skip(self, platform))]
    pub async fn observe_join(
        &self,
        guild_id: Snowflake,
        platform: &dyn ChatPlatform,
    ) -> Result<InviteDiff, DomainError> {
        let slot = self.slot(guild_id);
        let mut snapshot = slot.lock().await;

        let fetched = fetch(guild_id, platform).await?;

        let diff = match snapshot.as_mut() {
            Some(current) => {
                let diff = current
                    .find_used(&fetched)
                    .cloned()
                    .map_or(InviteDiff::Unchanged, InviteDiff::Used);
                current.refresh(&fetched);
                diff
            }
            None => {
                *snapshot = Some(InviteSnapshot::from_usages(&fetched));
                InviteDiff::Primed
            }
        };

        Ok(diff)
    }

    /// Check if a guild has a baseline
    pub async fn is_primed(&self, guild_id: Snowflake) -> bool {
        match self.guilds.get(&guild_id).map(|slot| slot.value().clone()) {
            Some(slot) => slot.lock().await.is_some(),
            None => false,
        }
    }

    /// Copy of a guild's current snapshot
    pub async fn snapshot(&self, guild_id: Snowflake) -> Option<InviteSnapshot> {
        let slot = self.guilds.get(&guild_id).map(|slot| slot.value().clone())?;
        let snapshot = slot.lock().await;
        snapshot.clone()
    }
}

impl std::fmt::Debug for InviteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InviteCache")
            .field("guilds", &self.guilds.len())
            .finish()
    }
}

async fn fetch(
    guild_id: Snowflake,
    platform: &dyn ChatPlatform,
) -> Result<Vec<InviteUsage>, DomainError> {
    platform.fetch_invites(guild_id).await.map_err(|e| match e {
        DomainError::CollaboratorUnavailable(_) => e,
        other => DomainError::CollaboratorUnavailable(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePlatform;

    const GUILD: Snowflake = Snowflake::new(1);

    fn usage(code: &str, uses: u64, inviter: i64) -> InviteUsage {
        InviteUsage::new(code, uses, Some(Snowflake::new(inviter)))
    }

    #[tokio::test]
    async fn test_first_observation_primes() {
        let platform = FakePlatform::new();
        platform.set_invites(GUILD, vec![usage("abc", 5, 10)]);
        let cache = InviteCache::new();

        assert!(!cache.is_primed(GUILD).await);
        assert_eq!(
            cache.observe_join(GUILD, &platform).await.unwrap(),
            InviteDiff::Primed
        );
        assert!(cache.is_primed(GUILD).await);
        assert_eq!(cache.snapshot(GUILD).await.unwrap().uses("abc"), 5);
    }

    #[tokio::test]
    async fn test_observe_matches_and_refreshes() {
        let platform = FakePlatform::new();
        platform.set_invites(GUILD, vec![usage("abc", 5, 10), usage("def", 2, 11)]);
        let cache = InviteCache::new();
        assert_eq!(cache.prime(GUILD, &platform).await.unwrap(), 2);

        platform.set_invites(GUILD, vec![usage("abc", 6, 10), usage("def", 2, 11)]);
        let diff = cache.observe_join(GUILD, &platform).await.unwrap();
        assert_eq!(diff, InviteDiff::Used(usage("abc", 6, 10)));

        let snapshot = cache.snapshot(GUILD).await.unwrap();
        assert_eq!(snapshot.uses("abc"), 6);
        assert_eq!(snapshot.uses("def"), 2);

        // Same counters again: nothing to attribute
        assert_eq!(
            cache.observe_join(GUILD, &platform).await.unwrap(),
            InviteDiff::Unchanged
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_snapshot() {
        let platform = FakePlatform::new();
        platform.set_invites(GUILD, vec![usage("abc", 5, 10)]);
        let cache = InviteCache::new();
        cache.prime(GUILD, &platform).await.unwrap();

        platform.fail_fetches(true);
        let err = cache.observe_join(GUILD, &platform).await.unwrap_err();
        assert!(matches!(err, DomainError::CollaboratorUnavailable(_)));
        assert_eq!(cache.snapshot(GUILD).await.unwrap().uses("abc"), 5);
    }

    #[tokio::test]
    async fn test_failed_prime_leaves_guild_unprimed() {
        let platform = FakePlatform::new();
        platform.fail_fetches(true);
        let cache = InviteCache::new();

        assert!(cache.prime(GUILD, &platform).await.is_err());
        assert!(!cache.is_primed(GUILD).await);
    }

    #[tokio::test]
    async fn test_concurrent_joins_each_see_one_increase() {
        let platform = Arc::new(FakePlatform::new());
        platform.set_invites(GUILD, vec![usage("abc", 0, 10)]);
        let cache = InviteCache::new();
        cache.prime(GUILD, platform.as_ref()).await.unwrap();

        // Every fetch reports one more use, as if one member joined per fetch
        platform.auto_increment("abc");

        let mut handles = Vec::new();
        for _ in 0..5 {
            let cache = cache.clone();
            let platform = Arc::clone(&platform);
            handles.push(tokio::spawn(async move {
                cache.observe_join(GUILD, platform.as_ref()).await
            }));
        }

        for handle in handles {
            let diff = handle.await.unwrap().unwrap();
            assert!(matches!(diff, InviteDiff::Used(ref u) if u.code == "abc"));
        }
        assert_eq!(cache.snapshot(GUILD).await.unwrap().uses("abc"), 5);
    }
}
