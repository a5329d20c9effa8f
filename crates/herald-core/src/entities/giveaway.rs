//! Giveaway entity - a timed draw announced in a channel
//!
//! Lifecycle: `Active` (accepting entries) -> `Ended` (winners drawn). The
//! transition happens exactly once, after `end_time_unix` has passed.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Duration used when the form value is missing or unusable
pub const DEFAULT_DURATION_MINUTES: u32 = 60;
/// Winner count used when the form value is missing or unusable
pub const DEFAULT_WINNER_COUNT: u32 = 1;

/// Giveaway lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GiveawayStatus {
    #[default]
    Active,
    Ended,
}

impl GiveawayStatus {
    /// Storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for GiveawayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GiveawayStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            other => Err(DomainError::InternalError(format!(
                "unknown giveaway status: {other}"
            ))),
        }
    }
}

/// Giveaway entity, keyed by its announcement message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Giveaway {
    pub message_id: Snowflake,
    pub channel_id: Snowflake,
    pub prize: String,
    pub description: String,
    pub end_time_unix: i64,
    pub winner_count: i32,
    /// Entry order is kept for display; membership is what matters
    pub participants: Vec<Snowflake>,
    /// Empty until the giveaway ends
    pub winners: Vec<Snowflake>,
    pub status: GiveawayStatus,
    pub created_at: DateTime<Utc>,
}

impl Giveaway {
    /// Check if the giveaway still accepts entries
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == GiveawayStatus::Active
    }

    /// Check if the giveaway should be resolved at `now_unix`
    #[inline]
    pub fn is_due(&self, now_unix: i64) -> bool {
        self.is_active() && now_unix >= self.end_time_unix
    }

    /// Check if a user already entered
    #[inline]
    pub fn has_entered(&self, user_id: Snowflake) -> bool {
        self.participants.contains(&user_id)
    }

    /// Number of entries
    #[inline]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Add a participant, returning the new participant count
    pub fn enter(&mut self, user_id: Snowflake) -> Result<usize, DomainError> {
        if !self.is_active() {
            return Err(DomainError::AlreadyEnded);
        }
        if self.has_entered(user_id) {
            return Err(DomainError::DuplicateEntry);
        }
        self.participants.push(user_id);
        Ok(self.participants.len())
    }

    /// Draw `min(winner_count, participants)` distinct winners
    ///
    /// Uniform without replacement: a Fisher-Yates shuffle of the entries,
    /// then the first `winner_count`.
    pub fn draw_winners<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Snowflake> {
        let mut pool = self.participants.clone();
        pool.shuffle(rng);
        pool.truncate(self.winner_count.max(1) as usize);
        pool
    }

    /// Move to `Ended` with the given winners
    pub fn finish(&mut self, winners: Vec<Snowflake>) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::AlreadyEnded);
        }
        self.winners = winners;
        self.status = GiveawayStatus::Ended;
        Ok(())
    }

    /// Summary handed to the chat platform once the giveaway ended
    pub fn outcome(&self) -> GiveawayOutcome {
        GiveawayOutcome {
            giveaway_id: self.message_id,
            channel_id: self.channel_id,
            prize: self.prize.clone(),
            winners: self.winners.clone(),
            participant_count: self.participants.len(),
        }
    }
}

/// Giveaway settings collected from the creation form, before the
/// announcement message exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayDraft {
    pub prize: String,
    pub description: String,
    pub duration_minutes: u32,
    pub winner_count: u32,
    pub end_time_unix: i64,
}

impl GiveawayDraft {
    /// Create a draft ending `duration_minutes` after `now_unix`
    pub fn new(
        prize: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: u32,
        winner_count: u32,
        now_unix: i64,
    ) -> Self {
        let duration_minutes = duration_minutes.max(1);
        Self {
            prize: prize.into(),
            description: description.into(),
            duration_minutes,
            winner_count: winner_count.max(1),
            end_time_unix: now_unix + i64::from(duration_minutes) * 60,
        }
    }

    /// Turn the draft into an active giveaway keyed by its announcement
    pub fn into_giveaway(self, message_id: Snowflake, channel_id: Snowflake) -> Giveaway {
        Giveaway {
            message_id,
            channel_id,
            prize: self.prize,
            description: self.description,
            end_time_unix: self.end_time_unix,
            winner_count: i32::try_from(self.winner_count).unwrap_or(i32::MAX),
            participants: Vec::new(),
            winners: Vec::new(),
            status: GiveawayStatus::Active,
            created_at: Utc::now(),
        }
    }
}

/// Result of a conditional "add participant" update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Entry recorded; carries the new participant count
    Entered { participants: usize },
    Duplicate,
    Ended,
    NotFound,
}

impl EntryOutcome {
    /// Convert into the participant count or the matching rejection
    pub fn into_result(self, giveaway_id: Snowflake) -> Result<usize, DomainError> {
        match self {
            Self::Entered { participants } => Ok(participants),
            Self::Duplicate => Err(DomainError::DuplicateEntry),
            Self::Ended => Err(DomainError::AlreadyEnded),
            Self::NotFound => Err(DomainError::GiveawayNotFound(giveaway_id)),
        }
    }
}

/// What the platform needs to announce a finished giveaway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayOutcome {
    pub giveaway_id: Snowflake,
    pub channel_id: Snowflake,
    pub prize: String,
    pub winners: Vec<Snowflake>,
    pub participant_count: usize,
}

impl GiveawayOutcome {
    /// Check if anybody won
    #[inline]
    pub fn has_winners(&self) -> bool {
        !self.winners.is_empty()
    }
}

/// Parse a positive integer the lenient way a form field deserves
///
/// Surrounding whitespace and trailing text are ignored ("10 min" -> 10).
/// Anything without a leading number, zero, negative, or out of range is
/// `MalformedInput`.
pub fn parse_positive(input: &str) -> Result<u32, DomainError> {
    let trimmed = input.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..digits_end].parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(DomainError::MalformedInput(input.to_string())),
    }
}
