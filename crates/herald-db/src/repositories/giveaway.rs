//! PostgreSQL implementation of GiveawayRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use herald_core::entities::{EntryOutcome, Giveaway};
use herald_core::error::DomainError;
use herald_core::traits::{GiveawayRepository, RepoResult};
use herald_core::value_objects::Snowflake;

use crate::mappers::{snowflakes_to_ids, GiveawayInsert};
use crate::models::GiveawayModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of GiveawayRepository
#[derive(Clone)]
pub struct PgGiveawayRepository {
    pool: PgPool,
}

impl PgGiveawayRepository {
    /// Create a new PgGiveawayRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_model(&self, message_id: Snowflake) -> RepoResult<Option<GiveawayModel>> {
        sqlx::query_as::<_, GiveawayModel>(
            r#"
            SELECT message_id, channel_id, prize, description, end_time, winner_count,
                   participants, winners, status, created_at
            FROM giveaways
            WHERE message_id = $1
            "#,
        )
        .bind(message_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl GiveawayRepository for PgGiveawayRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, message_id: Snowflake) -> RepoResult<Option<Giveaway>> {
        self.find_model(message_id)
            .await?
            .map(Giveaway::try_from)
            .transpose()
    }

    #[instrument(skip(self, giveaway), fields(giveaway_id = %giveaway.message_id))]
    async fn create(&self, giveaway: &Giveaway) -> RepoResult<()> {
        let insert = GiveawayInsert::new(giveaway);

        sqlx::query(
            r#"
            INSERT INTO giveaways (message_id, channel_id, prize, description, end_time,
                                   winner_count, participants, winners, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(insert.message_id)
        .bind(insert.channel_id)
        .bind(insert.prize)
        .bind(insert.description)
        .bind(insert.end_time)
        .bind(insert.winner_count)
        .bind(&insert.participants)
        .bind(&insert.winners)
        .bind(insert.status)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::GiveawayExists(giveaway.message_id))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_participant(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<EntryOutcome> {
        // Check-and-append in one statement so concurrent clicks cannot
        // produce a duplicate or slip in after the giveaway ended
        let count = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE giveaways
            SET participants = array_append(participants, $2)
            WHERE message_id = $1
              AND status = 'active'
              AND NOT ($2 = ANY(participants))
            RETURNING cardinality(participants)
            "#,
        )
        .bind(message_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(count) = count {
            return Ok(EntryOutcome::Entered {
                participants: usize::try_from(count).unwrap_or_default(),
            });
        }

        // Nothing updated: find out which condition failed
        Ok(match self.find_model(message_id).await? {
            None => EntryOutcome::NotFound,
            Some(model) if !model.is_active() => EntryOutcome::Ended,
            Some(_) => EntryOutcome::Duplicate,
        })
    }

    #[instrument(skip(self))]
    async fn find_due(&self, now_unix: i64) -> RepoResult<Vec<Giveaway>> {
        let results = sqlx::query_as::<_, GiveawayModel>(
            r#"
            SELECT message_id, channel_id, prize, description, end_time, winner_count,
                   participants, winners, status, created_at
            FROM giveaways
            WHERE status = 'active' AND end_time <= $1
            ORDER BY end_time ASC
            "#,
        )
        .bind(now_unix)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Giveaway::try_from).collect()
    }

    #[instrument(skip(self, winners), fields(winners = winners.len()))]
    async fn finish(&self, message_id: Snowflake, winners: &[Snowflake]) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE giveaways
            SET status = 'ended', winners = $2
            WHERE message_id = $1 AND status = 'active'
            "#,
        )
        .bind(message_id.into_inner())
        .bind(snowflakes_to_ids(winners))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}
