//! Service context - dependency container for services
//!
//! Holds all repositories, the chat platform port, and the invite cache.

use std::sync::Arc;

use herald_core::traits::{
    ChatPlatform, ConnectionRepository, GiveawayRepository, InviterStatsRepository,
};
use herald_db::{
    MemoryConnectionRepository, MemoryGiveawayRepository, MemoryInviterStatsRepository,
    PgConnectionRepository, PgGiveawayRepository, PgInviterStatsRepository, PgPool,
};

use super::error::{ServiceError, ServiceResult};
use super::invite_cache::InviteCache;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Inviter statistics, invite ledger and giveaway repositories
/// - The chat platform (invite fetches, result publishing)
/// - The per-guild invite snapshots
///
/// Cloning is cheap; every clone shares the same repositories and cache.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool (absent when running on the in-memory store)
    pool: Option<PgPool>,

    // Repositories
    stats_repo: Arc<dyn InviterStatsRepository>,
    connection_repo: Arc<dyn ConnectionRepository>,
    giveaway_repo: Arc<dyn GiveawayRepository>,

    // Chat platform
    platform: Arc<dyn ChatPlatform>,

    // In-process state
    invite_cache: InviteCache,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        stats_repo: Arc<dyn InviterStatsRepository>,
        connection_repo: Arc<dyn ConnectionRepository>,
        giveaway_repo: Arc<dyn GiveawayRepository>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Self {
        Self {
            pool,
            stats_repo,
            connection_repo,
            giveaway_repo,
            platform,
            invite_cache: InviteCache::new(),
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if the context is database backed
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Check database connectivity
    ///
    /// Always healthy on the in-memory store.
    pub async fn database_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            None => true,
        }
    }

    // === Repositories ===

    /// Get the inviter statistics repository
    pub fn stats_repo(&self) -> &dyn InviterStatsRepository {
        self.stats_repo.as_ref()
    }

    /// Get the invite ledger repository
    pub fn connection_repo(&self) -> &dyn ConnectionRepository {
        self.connection_repo.as_ref()
    }

    /// Get the giveaway repository
    pub fn giveaway_repo(&self) -> &dyn GiveawayRepository {
        self.giveaway_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the chat platform port
    pub fn platform(&self) -> &dyn ChatPlatform {
        self.platform.as_ref()
    }

    /// Get the per-guild invite snapshots
    pub fn invite_cache(&self) -> &InviteCache {
        &self.invite_cache
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("invite_cache", &self.invite_cache)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    stats_repo: Option<Arc<dyn InviterStatsRepository>>,
    connection_repo: Option<Arc<dyn ConnectionRepository>>,
    giveaway_repo: Option<Arc<dyn GiveawayRepository>>,
    platform: Option<Arc<dyn ChatPlatform>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use PostgreSQL repositories over `pool`
    pub fn postgres(self, pool: PgPool) -> Self {
        Self {
            stats_repo: Some(Arc::new(PgInviterStatsRepository::new(pool.clone()))),
            connection_repo: Some(Arc::new(PgConnectionRepository::new(pool.clone()))),
            giveaway_repo: Some(Arc::new(PgGiveawayRepository::new(pool.clone()))),
            pool: Some(pool),
            ..self
        }
    }

    /// Use fresh in-memory repositories
    pub fn in_memory(self) -> Self {
        Self {
            stats_repo: Some(Arc::new(MemoryInviterStatsRepository::new())),
            connection_repo: Some(Arc::new(MemoryConnectionRepository::new())),
            giveaway_repo: Some(Arc::new(MemoryGiveawayRepository::new())),
            pool: None,
            ..self
        }
    }

    pub fn stats_repo(mut self, repo: Arc<dyn InviterStatsRepository>) -> Self {
        self.stats_repo = Some(repo);
        self
    }

    pub fn connection_repo(mut self, repo: Arc<dyn ConnectionRepository>) -> Self {
        self.connection_repo = Some(repo);
        self
    }

    pub fn giveaway_repo(mut self, repo: Arc<dyn GiveawayRepository>) -> Self {
        self.giveaway_repo = Some(repo);
        self
    }

    pub fn platform(mut self, platform: Arc<dyn ChatPlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool,
            self.stats_repo
                .ok_or_else(|| ServiceError::validation("stats_repo is required"))?,
            self.connection_repo
                .ok_or_else(|| ServiceError::validation("connection_repo is required"))?,
            self.giveaway_repo
                .ok_or_else(|| ServiceError::validation("giveaway_repo is required"))?,
            self.platform
                .ok_or_else(|| ServiceError::validation("platform is required"))?,
        ))
    }
}
