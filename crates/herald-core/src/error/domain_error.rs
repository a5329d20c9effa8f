//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Attribution
    // =========================================================================
    /// No invite-use delta could be matched to a join
    #[error("No invite could be attributed to this join")]
    NoAttribution,

    // =========================================================================
    // Giveaway Rejections
    // =========================================================================
    #[error("Giveaway not found: {0}")]
    GiveawayNotFound(Snowflake),

    #[error("Giveaway has already ended")]
    AlreadyEnded,

    #[error("Already entered this giveaway")]
    DuplicateEntry,

    #[error("Giveaway already exists: {0}")]
    GiveawayExists(Snowflake),

    // =========================================================================
    // Input
    // =========================================================================
    /// Unparsable numeric input. Callers recover with a default value.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Collaborators (wrapped)
    // =========================================================================
    /// The chat platform could not serve a fetch/edit/send
    #[error("Chat platform unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get a stable error code string for logs and replies
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoAttribution => "NO_ATTRIBUTION",
            Self::GiveawayNotFound(_) => "UNKNOWN_GIVEAWAY",
            Self::AlreadyEnded => "GIVEAWAY_ENDED",
            Self::DuplicateEntry => "DUPLICATE_ENTRY",
            Self::GiveawayExists(_) => "GIVEAWAY_EXISTS",
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::CollaboratorUnavailable(_) => "COLLABORATOR_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error is a user-visible rejection with no state change
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::AlreadyEnded | Self::DuplicateEntry | Self::GiveawayNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::MalformedInput(_))
    }
}
