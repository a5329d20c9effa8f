//! Data transfer objects
//!
//! This module provides:
//! - Request DTOs with validation for form inputs
//! - Response DTOs handed to the gateway and the health view
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::CreateGiveawayRequest;

pub use responses::{
    GiveawayResponse, HealthChecks, HealthResponse, ReadinessResponse, StatsResponse,
};
