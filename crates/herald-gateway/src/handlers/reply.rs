//! What the platform adapter should do after an event was handled

use herald_core::GiveawayDraft;
use herald_service::dto::{GiveawayResponse, StatsResponse};

/// Handler output, rendered by the platform adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to send
    None,
    /// Statistics card for `/invites`
    Stats(StatsResponse),
    /// Command overview for `/help`
    Help,
    /// Show the giveaway creation form
    OpenGiveawayForm,
    /// Post the announcement; the giveaway is created once its message exists
    AnnounceGiveaway(GiveawayDraft),
    /// Entry recorded; refresh the announcement with the new count
    EntryAccepted(GiveawayResponse),
}

impl Reply {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
