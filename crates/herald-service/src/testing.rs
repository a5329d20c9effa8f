//! Test doubles
//!
//! A recording chat platform and an in-memory service context. Available to
//! this crate's tests and, with the `testing` feature, to dependent crates.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use herald_core::entities::{GiveawayOutcome, InviteUsage};
use herald_core::traits::{ChatPlatform, RepoResult};
use herald_core::{DomainError, Snowflake};

use crate::services::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct FakeState {
    invites: HashMap<Snowflake, Vec<InviteUsage>>,
    auto_increment: Option<String>,
    fail_fetches: bool,
    fail_publishes: bool,
    fetches: usize,
    published: Vec<GiveawayOutcome>,
}

/// Chat platform that serves scripted invite lists and records published results
#[derive(Default)]
pub struct FakePlatform {
    state: Mutex<FakeState>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the invite list returned for a guild
    pub fn set_invites(&self, guild_id: Snowflake, invites: Vec<InviteUsage>) {
        self.state().invites.insert(guild_id, invites);
    }

    /// Bump the use counter of `code` by one on every fetch
    pub fn auto_increment(&self, code: &str) {
        self.state().auto_increment = Some(code.to_string());
    }

    /// Make invite fetches fail
    pub fn fail_fetches(&self, fail: bool) {
        self.state().fail_fetches = fail;
    }

    /// Make result publishing fail
    pub fn fail_publishes(&self, fail: bool) {
        self.state().fail_publishes = fail;
    }

    /// Number of invite fetches served or failed
    pub fn fetch_count(&self) -> usize {
        self.state().fetches
    }

    /// Results published so far
    pub fn published(&self) -> Vec<GiveawayOutcome> {
        self.state().published.clone()
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn fetch_invites(&self, guild_id: Snowflake) -> RepoResult<Vec<InviteUsage>> {
        let mut state = self.state();
        state.fetches += 1;
        if state.fail_fetches {
            return Err(DomainError::CollaboratorUnavailable(
                "invite fetch refused".to_string(),
            ));
        }

        let bump = state.auto_increment.clone();
        let invites = state.invites.entry(guild_id).or_default();
        if let Some(code) = bump {
            if let Some(invite) = invites.iter_mut().find(|invite| invite.code == code) {
                invite.uses += 1;
            }
        }
        Ok(invites.clone())
    }

    async fn publish_giveaway_result(&self, outcome: &GiveawayOutcome) -> RepoResult<()> {
        let mut state = self.state();
        if state.fail_publishes {
            return Err(DomainError::CollaboratorUnavailable(format!(
                "announcement {} is gone",
                outcome.giveaway_id
            )));
        }
        state.published.push(outcome.clone());
        Ok(())
    }
}

/// Service context over fresh in-memory repositories
pub fn memory_context(platform: Arc<dyn ChatPlatform>) -> ServiceContext {
    ServiceContextBuilder::new()
        .in_memory()
        .platform(platform)
        .build()
        .unwrap_or_else(|e| panic!("in-memory context is always complete: {e}"))
}
