//! # herald-service
//!
//! Application layer containing the invite-attribution and giveaway use
//! cases, the per-guild invite cache, the giveaway scheduler, and DTOs.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use services::{
    Attribution, AttributionService, GiveawayScheduler, GiveawayService, InviteCache, InviteDiff,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, StatsService, SweepReport,
};
