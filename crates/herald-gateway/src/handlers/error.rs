//! Handler error types

use herald_core::DomainError;
use herald_service::ServiceError;
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Event could not be interpreted
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Caller lacks the owner role
    #[error("Missing required role")]
    Forbidden,

    /// Service error
    #[error("Service error: {0}")]
    ServiceError(#[from] ServiceError),

    /// Domain error (from repositories)
    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::ServiceError(e) => e.as_domain(),
            Self::DomainError(e) => Some(e),
            _ => None,
        }
    }

    /// Expected outcome rather than a fault; logged at debug level
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Forbidden => true,
            Self::ServiceError(e) => e.is_user_facing() || e.is_no_attribution(),
            Self::DomainError(e) => {
                e.is_rejection() || e.is_validation() || matches!(e, DomainError::NoAttribution)
            }
            Self::InvalidPayload(_) | Self::Internal(_) => false,
        }
    }

    /// Text for the ephemeral reply shown to the member who caused the error
    pub fn user_message(&self) -> String {
        if let Some(domain) = self.domain() {
            match domain {
                DomainError::AlreadyEnded | DomainError::GiveawayNotFound(_) => {
                    return "❌ This giveaway has ended.".to_string();
                }
                DomainError::DuplicateEntry => {
                    return "❌ You are already participating.".to_string();
                }
                DomainError::ValidationError(msg) => return format!("❌ {msg}"),
                _ => {}
            }
        }

        match self {
            Self::Forbidden => "❌ You don't have permission.".to_string(),
            Self::ServiceError(ServiceError::Validation(msg)) => format!("❌ {msg}"),
            _ => "❌ Something went wrong, please try again later.".to_string(),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
