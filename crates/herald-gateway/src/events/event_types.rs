//! Bot event types
//!
//! Names of the platform callbacks the bot reacts to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bot event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BotEventType {
    /// Connected to the gateway
    Ready,
    /// User joined guild
    GuildMemberAdd,
    /// User left guild
    GuildMemberRemove,
    /// Slash command invoked
    Command,
    /// Message button pressed
    Button,
    /// Modal form submitted
    ModalSubmit,
}

impl BotEventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::GuildMemberAdd => "GUILD_MEMBER_ADD",
            Self::GuildMemberRemove => "GUILD_MEMBER_REMOVE",
            Self::Command => "COMMAND",
            Self::Button => "BUTTON",
            Self::ModalSubmit => "MODAL_SUBMIT",
        }
    }

    /// Parse an event type from a string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "READY" => Some(Self::Ready),
            "GUILD_MEMBER_ADD" => Some(Self::GuildMemberAdd),
            "GUILD_MEMBER_REMOVE" => Some(Self::GuildMemberRemove),
            "COMMAND" => Some(Self::Command),
            "BUTTON" => Some(Self::Button),
            "MODAL_SUBMIT" => Some(Self::ModalSubmit),
            _ => None,
        }
    }

    /// Check if this event comes from a user interaction that expects a reply
    #[must_use]
    pub const fn is_interaction(self) -> bool {
        matches!(self, Self::Command | Self::Button | Self::ModalSubmit)
    }
}

impl fmt::Display for BotEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<BotEventType> for String {
    fn from(event: BotEventType) -> Self {
        event.as_str().to_string()
    }
}
