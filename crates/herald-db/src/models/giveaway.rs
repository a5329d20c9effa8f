//! Giveaway database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for giveaways table
#[derive(Debug, Clone, FromRow)]
pub struct GiveawayModel {
    pub message_id: i64,
    pub channel_id: i64,
    pub prize: String,
    pub description: String,
    /// Unix seconds
    pub end_time: i64,
    pub winner_count: i32,
    pub participants: Vec<i64>,
    pub winners: Vec<i64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl GiveawayModel {
    /// Check if the row is still accepting entries
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}
