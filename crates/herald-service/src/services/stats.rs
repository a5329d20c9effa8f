//! Statistics service
//!
//! Read-only view of an inviter's counters.

use tracing::instrument;

use herald_core::entities::InviterStats;
use herald_core::Snowflake;

use crate::dto::StatsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Statistics service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the counters of a user; all zero when they never invited anyone
    #[instrument(skip(self))]
    pub async fn get_stats(&self, user_id: Snowflake) -> ServiceResult<StatsResponse> {
        let stats = self
            .ctx
            .stats_repo()
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| InviterStats::new(user_id));

        Ok(StatsResponse::from(&stats))
    }
}
