//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Statistics Responses
// ============================================================================

/// Invite counters of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsResponse {
    pub user_id: String,
    pub joins: i32,
    pub leaves: i32,
    pub fakes: i32,
    /// `max(0, joins - leaves - fakes)`
    pub net: i32,
}

// ============================================================================
// Giveaway Responses
// ============================================================================

/// Giveaway state as shown on its announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiveawayResponse {
    pub id: String,
    pub channel_id: String,
    pub prize: String,
    pub description: String,
    pub end_time_unix: i64,
    pub winner_count: i32,
    pub participant_count: usize,
    pub winners: Vec<String>,
    pub status: String,
}

impl GiveawayResponse {
    /// Check if the giveaway is still running
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub gateway: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, gateway_connected: bool) -> Self {
        let all_healthy = database_healthy && gateway_connected;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                gateway: if gateway_connected { "connected" } else { "disconnected" }.to_string(),
            },
        }
    }

    /// Check if every dependency is healthy
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
