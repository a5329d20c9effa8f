//! # herald-db
//!
//! Database layer implementing the repository traits of `herald-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations (PostgreSQL via SQLx)
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//! - An in-memory store with the same semantics, for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use herald_db::{create_pool, run_migrations, DatabaseConfig, PgGiveawayRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let giveaways = PgGiveawayRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryConnectionRepository, MemoryGiveawayRepository, MemoryInviterStatsRepository};
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgConnectionRepository, PgGiveawayRepository, PgInviterStatsRepository};
