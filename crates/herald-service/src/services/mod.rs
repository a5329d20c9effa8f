//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod attribution;
pub mod context;
pub mod error;
pub mod giveaway;
pub mod invite_cache;
pub mod scheduler;
pub mod stats;

// Re-export all services for convenience
pub use attribution::{Attribution, AttributionService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use giveaway::GiveawayService;
pub use invite_cache::{InviteCache, InviteDiff};
pub use scheduler::{GiveawayScheduler, SweepReport};
pub use stats::StatsService;
