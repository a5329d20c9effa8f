//! Test fixtures and data generators

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

use herald_core::{InviteUsage, Snowflake};
use herald_gateway::events::ids::{
    FIELD_DESCRIPTION, FIELD_DURATION, FIELD_PRIZE, FIELD_WINNERS, GIVEAWAY_MODAL,
};
use herald_gateway::events::ModalSubmitEvent;

pub const GUILD_ID: Snowflake = Snowflake::new(1_466_085_204_127_907_922);
pub const OWNER_ROLE_ID: Snowflake = Snowflake::new(1_466_088_975_507_915_011);
pub const CHANNEL_ID: Snowflake = Snowflake::new(1_466_090_000_000_000_000);

/// Counter for unique test data
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> i64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh user ID whose embedded creation time is `days` before `now`
pub fn user_aged(days: i64, now: DateTime<Utc>) -> Snowflake {
    let base = Snowflake::from_datetime(now - Duration::days(days));
    Snowflake::new(base.into_inner() | (unique_suffix() & 0xFFF))
}

/// A fresh ID with no meaningful timestamp (inviters, messages)
pub fn unique_id() -> Snowflake {
    Snowflake::new(1_000_000 + unique_suffix())
}

pub fn invite(code: &str, uses: u64, inviter: Snowflake) -> InviteUsage {
    InviteUsage::new(code, uses, Some(inviter))
}

/// Values typed into the giveaway creation form
#[derive(Debug, Clone)]
pub struct GiveawayForm {
    pub prize: String,
    pub description: String,
    pub minutes: String,
    pub winners: String,
}

impl GiveawayForm {
    pub fn new(prize: &str, minutes: &str, winners: &str) -> Self {
        Self {
            prize: prize.to_string(),
            description: "Integration test giveaway".to_string(),
            minutes: minutes.to_string(),
            winners: winners.to_string(),
        }
    }

    pub fn into_event(self, user_id: Snowflake) -> ModalSubmitEvent {
        ModalSubmitEvent {
            guild_id: Some(GUILD_ID),
            channel_id: CHANNEL_ID,
            user_id,
            custom_id: GIVEAWAY_MODAL.to_string(),
            fields: HashMap::from([
                (FIELD_PRIZE.to_string(), self.prize),
                (FIELD_DESCRIPTION.to_string(), self.description),
                (FIELD_DURATION.to_string(), self.minutes),
                (FIELD_WINNERS.to_string(), self.winners),
            ]),
        }
    }
}
