//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Giveaway Requests
// ============================================================================

/// Giveaway creation form
///
/// `duration_minutes` and `winner_count` are kept raw; they are parsed
/// leniently and fall back to defaults instead of failing validation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGiveawayRequest {
    #[validate(length(min = 1, max = 256, message = "Prize must be 1-256 characters"))]
    pub prize: String,

    #[serde(default)]
    #[validate(length(max = 4000, message = "Description must be at most 4000 characters"))]
    pub description: String,

    pub duration_minutes: Option<String>,

    pub winner_count: Option<String>,
}

impl CreateGiveawayRequest {
    /// Build a form with trimmed text fields
    pub fn new(
        prize: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: Option<String>,
        winner_count: Option<String>,
    ) -> Self {
        Self {
            prize: prize.into().trim().to_string(),
            description: description.into().trim().to_string(),
            duration_minutes,
            winner_count,
        }
    }
}
