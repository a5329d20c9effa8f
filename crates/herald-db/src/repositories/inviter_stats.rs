//! PostgreSQL implementation of InviterStatsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use herald_core::entities::InviterStats;
use herald_core::traits::{InviterStatsRepository, RepoResult};
use herald_core::value_objects::Snowflake;

use crate::models::InviterStatsModel;

use super::error::map_db_error;

/// PostgreSQL implementation of InviterStatsRepository
#[derive(Clone)]
pub struct PgInviterStatsRepository {
    pool: PgPool,
}

impl PgInviterStatsRepository {
    /// Create a new PgInviterStatsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviterStatsRepository for PgInviterStatsRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<InviterStats>> {
        let result = sqlx::query_as::<_, InviterStatsModel>(
            r#"
            SELECT user_id, joins, leaves, fakes, updated_at
            FROM inviter_stats
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(InviterStats::from))
    }

    #[instrument(skip(self))]
    async fn record_join(&self, inviter_id: Snowflake, fake: bool) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inviter_stats (user_id, joins, leaves, fakes, updated_at)
            VALUES ($1, 1, 0, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET joins = inviter_stats.joins + 1,
                fakes = inviter_stats.fakes + EXCLUDED.fakes,
                updated_at = NOW()
            "#,
        )
        .bind(inviter_id.into_inner())
        .bind(i32::from(fake))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_leave(&self, inviter_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE inviter_stats
            SET leaves = leaves + 1, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(inviter_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
