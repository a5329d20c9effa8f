//! Inviter statistics - per-inviter join/leave/fake counters

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::Snowflake;

/// Accounts younger than this at join time count as fake
pub const FAKE_ACCOUNT_AGE_DAYS: i64 = 90;

/// Counters for one inviter
///
/// `net` is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviterStats {
    pub user_id: Snowflake,
    pub joins: i32,
    pub leaves: i32,
    pub fakes: i32,
    pub updated_at: DateTime<Utc>,
}

impl InviterStats {
    /// Create an empty record for an inviter
    pub fn new(user_id: Snowflake) -> Self {
        Self {
            user_id,
            joins: 0,
            leaves: 0,
            fakes: 0,
            updated_at: Utc::now(),
        }
    }

    /// Net invites: `max(0, joins - leaves - fakes)`
    pub fn net(&self) -> i32 {
        self.joins
            .saturating_sub(self.leaves)
            .saturating_sub(self.fakes)
            .max(0)
    }

    /// Count an attributed join; a fake join also counts as a fake
    pub fn record_join(&mut self, fake: bool) {
        self.joins = self.joins.saturating_add(1);
        if fake {
            self.fakes = self.fakes.saturating_add(1);
        }
        self.updated_at = Utc::now();
    }

    /// Count a departure of someone this inviter brought in
    pub fn record_leave(&mut self) {
        self.leaves = self.leaves.saturating_add(1);
        self.updated_at = Utc::now();
    }
}

/// Check whether an account was too young at `now` to count as a real invite
pub fn is_fake_account(account_created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - account_created_at < Duration::days(FAKE_ACCOUNT_AGE_DAYS)
}
