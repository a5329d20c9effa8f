//! Attribution service
//!
//! Matches member joins to the invite that was used and keeps the inviter
//! statistics and invite ledger up to date.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use herald_core::entities::{is_fake_account, Connection};
use herald_core::{DomainError, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::invite_cache::InviteDiff;

/// A join successfully attributed to an inviter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub invited_id: Snowflake,
    pub inviter_id: Snowflake,
    pub code: String,
    /// Account was younger than the fake threshold at join time
    pub fake: bool,
}

/// Attribution service
pub struct AttributionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttributionService<'a> {
    /// Create a new AttributionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Take the baseline invite counters of a guild
    #[instrument(skip(self))]
    pub async fn prime(&self, guild_id: Snowflake) -> ServiceResult<usize> {
        let invites = self
            .ctx
            .invite_cache()
            .prime(guild_id, self.ctx.platform())
            .await?;

        info!(guild_id = %guild_id, invites, "Invite cache primed");
        Ok(invites)
    }

    /// Attribute a join to the inviter whose invite counter went up
    ///
    /// # Errors
    /// - `NoAttribution` when no counter increased, the used invite has no
    ///   inviter, or the guild had no baseline yet (it has one afterwards)
    /// - `CollaboratorUnavailable` when the invite list could not be fetched
    #[instrument(skip(self, account_created_at, now))]
    pub async fn member_joined(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        account_created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ServiceResult<Attribution> {
        let diff = self
            .ctx
            .invite_cache()
            .observe_join(guild_id, self.ctx.platform())
            .await?;

        let used = match diff {
            InviteDiff::Used(used) => used,
            InviteDiff::Primed => {
                debug!(guild_id = %guild_id, "Join arrived before the cache was primed");
                return Err(DomainError::NoAttribution.into());
            }
            InviteDiff::Unchanged => return Err(DomainError::NoAttribution.into()),
        };
        let inviter_id = used.inviter_id.ok_or(DomainError::NoAttribution)?;

        let fake = is_fake_account(account_created_at, now);

        self.ctx
            .connection_repo()
            .upsert(&Connection::new(user_id, inviter_id))
            .await?;
        self.ctx.stats_repo().record_join(inviter_id, fake).await?;

        info!(
            invited_id = %user_id,
            inviter_id = %inviter_id,
            code = %used.code,
            fake,
            "Join attributed"
        );

        Ok(Attribution {
            invited_id: user_id,
            inviter_id,
            code: used.code,
            fake,
        })
    }

    /// Count a departure against whoever invited the member
    ///
    /// Returns the inviter, or `None` when the member was never attributed.
    /// Only an existing statistics record is updated.
    #[instrument(skip(self))]
    pub async fn member_left(&self, user_id: Snowflake) -> ServiceResult<Option<Snowflake>> {
        let Some(connection) = self.ctx.connection_repo().find_by_invited(user_id).await? else {
            debug!(user_id = %user_id, "Departed member has no inviter on record");
            return Ok(None);
        };

        let updated = self
            .ctx
            .stats_repo()
            .record_leave(connection.inviter_id)
            .await?;

        if updated {
            info!(user_id = %user_id, inviter_id = %connection.inviter_id, "Leave recorded");
        } else {
            debug!(inviter_id = %connection.inviter_id, "Inviter has no statistics record");
        }

        Ok(Some(connection.inviter_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{memory_context, FakePlatform};
    use chrono::Duration;
    use herald_core::entities::InviteUsage;
    use std::sync::Arc;

    const GUILD: Snowflake = Snowflake::new(1);
    const INVITER: Snowflake = Snowflake::new(500);

    fn usage(code: &str, uses: u64, inviter: Option<Snowflake>) -> InviteUsage {
        InviteUsage::new(code, uses, inviter)
    }

    async fn primed(invites: Vec<InviteUsage>) -> (ServiceContext, Arc<FakePlatform>) {
        let platform = Arc::new(FakePlatform::new());
        platform.set_invites(GUILD, invites);
        let ctx = memory_context(platform.clone());
        AttributionService::new(&ctx).prime(GUILD).await.unwrap();
        (ctx, platform)
    }

    fn old_account(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(400)
    }

    #[tokio::test]
    async fn test_join_attributed_to_increased_invite() {
        let (ctx, platform) = primed(vec![
            usage("abc", 5, Some(INVITER)),
            usage("def", 2, Some(Snowflake::new(501))),
        ])
        .await;
        platform.set_invites(
            GUILD,
            vec![
                usage("abc", 6, Some(INVITER)),
                usage("def", 2, Some(Snowflake::new(501))),
            ],
        );

        let now = Utc::now();
        let user = Snowflake::new(42);
        let attribution = AttributionService::new(&ctx)
            .member_joined(GUILD, user, old_account(now), now)
            .await
            .unwrap();

        assert_eq!(attribution.inviter_id, INVITER);
        assert_eq!(attribution.code, "abc");
        assert!(!attribution.fake);

        let stats = ctx.stats_repo().find_by_user(INVITER).await.unwrap().unwrap();
        assert_eq!((stats.joins, stats.leaves, stats.fakes), (1, 0, 0));
        let connection = ctx.connection_repo().find_by_invited(user).await.unwrap().unwrap();
        assert_eq!(connection.inviter_id, INVITER);
    }

    #[tokio::test]
    async fn test_young_account_counts_as_fake() {
        let (ctx, platform) = primed(vec![usage("abc", 0, Some(INVITER))]).await;
        platform.set_invites(GUILD, vec![usage("abc", 1, Some(INVITER))]);

        let now = Utc::now();
        let attribution = AttributionService::new(&ctx)
            .member_joined(GUILD, Snowflake::new(42), now - Duration::days(10), now)
            .await
            .unwrap();

        assert!(attribution.fake);
        let stats = ctx.stats_repo().find_by_user(INVITER).await.unwrap().unwrap();
        assert_eq!((stats.joins, stats.fakes), (1, 1));
        assert_eq!(stats.net(), 0);
    }

    #[tokio::test]
    async fn test_no_increase_is_no_attribution() {
        let (ctx, _platform) = primed(vec![usage("abc", 5, Some(INVITER))]).await;

        let now = Utc::now();
        let err = AttributionService::new(&ctx)
            .member_joined(GUILD, Snowflake::new(42), old_account(now), now)
            .await
            .unwrap_err();

        assert!(err.is_no_attribution());
        assert!(ctx.stats_repo().find_by_user(INVITER).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_vanity_invite_is_no_attribution() {
        let (ctx, platform) = primed(vec![usage("vanity", 3, None)]).await;
        platform.set_invites(GUILD, vec![usage("vanity", 4, None)]);

        let now = Utc::now();
        let err = AttributionService::new(&ctx)
            .member_joined(GUILD, Snowflake::new(42), old_account(now), now)
            .await
            .unwrap_err();

        assert!(err.is_no_attribution());
        assert!(ctx
            .connection_repo()
            .find_by_invited(Snowflake::new(42))
            .await
            .unwrap()
            .is_none());
        // The snapshot still moved forward
        assert_eq!(ctx.invite_cache().snapshot(GUILD).await.unwrap().uses("vanity"), 4);
    }

    #[tokio::test]
    async fn test_unprimed_guild_primes_and_skips() {
        let platform = Arc::new(FakePlatform::new());
        platform.set_invites(GUILD, vec![usage("abc", 7, Some(INVITER))]);
        let ctx = memory_context(platform.clone());

        let now = Utc::now();
        let err = AttributionService::new(&ctx)
            .member_joined(GUILD, Snowflake::new(42), old_account(now), now)
            .await
            .unwrap_err();

        assert!(err.is_no_attribution());
        assert!(ctx.invite_cache().is_primed(GUILD).await);
        assert!(ctx.stats_repo().find_by_user(INVITER).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_collaborator_unavailable() {
        let (ctx, platform) = primed(vec![usage("abc", 5, Some(INVITER))]).await;
        platform.fail_fetches(true);

        let now = Utc::now();
        let err = AttributionService::new(&ctx)
            .member_joined(GUILD, Snowflake::new(42), old_account(now), now)
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "COLLABORATOR_UNAVAILABLE");
        assert_eq!(ctx.invite_cache().snapshot(GUILD).await.unwrap().uses("abc"), 5);
    }

    #[tokio::test]
    async fn test_leave_counts_against_inviter() {
        let (ctx, platform) = primed(vec![usage("abc", 0, Some(INVITER))]).await;
        platform.set_invites(GUILD, vec![usage("abc", 1, Some(INVITER))]);
        let service = AttributionService::new(&ctx);

        let now = Utc::now();
        let user = Snowflake::new(42);
        service
            .member_joined(GUILD, user, old_account(now), now)
            .await
            .unwrap();

        assert_eq!(service.member_left(user).await.unwrap(), Some(INVITER));
        let stats = ctx.stats_repo().find_by_user(INVITER).await.unwrap().unwrap();
        assert_eq!((stats.joins, stats.leaves), (1, 1));
        assert_eq!(stats.net(), 0);
    }

    #[tokio::test]
    async fn test_leave_of_unknown_member_is_noop() {
        let platform = Arc::new(FakePlatform::new());
        let ctx = memory_context(platform);

        let left = AttributionService::new(&ctx)
            .member_left(Snowflake::new(42))
            .await
            .unwrap();
        assert!(left.is_none());
    }

    #[tokio::test]
    async fn test_leave_does_not_create_stats() {
        let platform = Arc::new(FakePlatform::new());
        let ctx = memory_context(platform);
        let user = Snowflake::new(42);
        ctx.connection_repo()
            .upsert(&Connection::new(user, INVITER))
            .await
            .unwrap();

        let left = AttributionService::new(&ctx).member_left(user).await.unwrap();
        assert_eq!(left, Some(INVITER));
        assert!(ctx.stats_repo().find_by_user(INVITER).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejoin_through_other_inviter_overwrites_ledger() {
        let other = Snowflake::new(501);
        let (ctx, platform) = primed(vec![
            usage("abc", 0, Some(INVITER)),
            usage("xyz", 0, Some(other)),
        ])
        .await;
        let service = AttributionService::new(&ctx);
        let user = Snowflake::new(42);
        let now = Utc::now();

        platform.set_invites(
            GUILD,
            vec![usage("abc", 1, Some(INVITER)), usage("xyz", 0, Some(other))],
        );
        service.member_joined(GUILD, user, old_account(now), now).await.unwrap();
        service.member_left(user).await.unwrap();

        platform.set_invites(
            GUILD,
            vec![usage("abc", 1, Some(INVITER)), usage("xyz", 1, Some(other))],
        );
        service.member_joined(GUILD, user, old_account(now), now).await.unwrap();

        let connection = ctx.connection_repo().find_by_invited(user).await.unwrap().unwrap();
        assert_eq!(connection.inviter_id, other);

        // The earlier leave stays on the first inviter
        let first = ctx.stats_repo().find_by_user(INVITER).await.unwrap().unwrap();
        assert_eq!((first.joins, first.leaves), (1, 1));
        let second = ctx.stats_repo().find_by_user(other).await.unwrap().unwrap();
        assert_eq!((second.joins, second.leaves), (1, 0));
    }
}
