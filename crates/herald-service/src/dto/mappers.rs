//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use herald_core::entities::{Giveaway, InviterStats};

use super::responses::{GiveawayResponse, StatsResponse};

// ============================================================================
// Statistics Mappers
// ============================================================================

impl From<&InviterStats> for StatsResponse {
    fn from(stats: &InviterStats) -> Self {
        Self {
            user_id: stats.user_id.to_string(),
            joins: stats.joins,
            leaves: stats.leaves,
            fakes: stats.fakes,
            net: stats.net(),
        }
    }
}

impl From<InviterStats> for StatsResponse {
    fn from(stats: InviterStats) -> Self {
        Self::from(&stats)
    }
}

// ============================================================================
// Giveaway Mappers
// ============================================================================

impl From<&Giveaway> for GiveawayResponse {
    fn from(giveaway: &Giveaway) -> Self {
        Self {
            id: giveaway.message_id.to_string(),
            channel_id: giveaway.channel_id.to_string(),
            prize: giveaway.prize.clone(),
            description: giveaway.description.clone(),
            end_time_unix: giveaway.end_time_unix,
            winner_count: giveaway.winner_count,
            participant_count: giveaway.participant_count(),
            winners: giveaway.winners.iter().map(ToString::to_string).collect(),
            status: giveaway.status.to_string(),
        }
    }
}

impl From<Giveaway> for GiveawayResponse {
    fn from(giveaway: Giveaway) -> Self {
        Self::from(&giveaway)
    }
}
