//! PostgreSQL implementation of ConnectionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use herald_core::entities::Connection;
use herald_core::traits::{ConnectionRepository, RepoResult};
use herald_core::value_objects::Snowflake;

use crate::models::ConnectionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ConnectionRepository
#[derive(Clone)]
pub struct PgConnectionRepository {
    pool: PgPool,
}

impl PgConnectionRepository {
    /// Create a new PgConnectionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionRepository for PgConnectionRepository {
    #[instrument(skip(self))]
    async fn find_by_invited(&self, invited_id: Snowflake) -> RepoResult<Option<Connection>> {
        let result = sqlx::query_as::<_, ConnectionModel>(
            r#"
            SELECT invited_id, inviter_id, updated_at
            FROM invite_connections
            WHERE invited_id = $1
            "#,
        )
        .bind(invited_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Connection::from))
    }

    #[instrument(skip(self))]
    async fn upsert(&self, connection: &Connection) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO invite_connections (invited_id, inviter_id, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (invited_id) DO UPDATE
            SET inviter_id = EXCLUDED.inviter_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(connection.invited_id.into_inner())
        .bind(connection.inviter_id.into_inner())
        .bind(connection.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
