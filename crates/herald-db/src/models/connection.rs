//! Invite connection database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for invite_connections table
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionModel {
    pub invited_id: i64,
    pub inviter_id: i64,
    pub updated_at: DateTime<Utc>,
}
