//! Inviter statistics database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for inviter_stats table
#[derive(Debug, Clone, FromRow)]
pub struct InviterStatsModel {
    pub user_id: i64,
    pub joins: i32,
    pub leaves: i32,
    pub fakes: i32,
    pub updated_at: DateTime<Utc>,
}
