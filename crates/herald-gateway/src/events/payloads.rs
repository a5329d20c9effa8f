//! Event payload definitions
//!
//! Platform-neutral data for each event type, filled in by the adapter.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use herald_core::Snowflake;

use super::BotEventType;

/// READY payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyEvent {
    /// Guilds the bot is in
    pub guild_ids: Vec<Snowflake>,
}

/// GUILD_MEMBER_ADD payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAddEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub account_created_at: DateTime<Utc>,
}

impl MemberAddEvent {
    /// Build the payload, deriving the account age from the user ID
    #[must_use]
    pub fn new(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            guild_id,
            user_id,
            account_created_at: user_id.created_at(),
        }
    }
}

/// GUILD_MEMBER_REMOVE payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRemoveEvent {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
}

/// Slash command payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    /// Roles of the invoking member (empty outside a guild)
    pub member_roles: Vec<Snowflake>,
    pub name: String,
    /// User option, for commands that take one
    pub target_user: Option<Snowflake>,
}

impl CommandEvent {
    /// Check if the invoking member has a role
    #[must_use]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.member_roles.contains(&role_id)
    }
}

/// Button press payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonEvent {
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    /// Message carrying the button
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub custom_id: String,
}

/// Modal submission payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSubmitEvent {
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub custom_id: String,
    /// Text input values keyed by custom ID
    pub fields: HashMap<String, String>,
}

impl ModalSubmitEvent {
    /// Value of a text input, if it was submitted
    #[must_use]
    pub fn field(&self, custom_id: &str) -> Option<&str> {
        self.fields.get(custom_id).map(String::as_str)
    }
}

/// Everything the dispatch table can receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    Ready(ReadyEvent),
    GuildMemberAdd(MemberAddEvent),
    GuildMemberRemove(MemberRemoveEvent),
    Command(CommandEvent),
    Button(ButtonEvent),
    ModalSubmit(ModalSubmitEvent),
}

impl BotEvent {
    /// Get the event type
    #[must_use]
    pub fn event_type(&self) -> BotEventType {
        match self {
            Self::Ready(_) => BotEventType::Ready,
            Self::GuildMemberAdd(_) => BotEventType::GuildMemberAdd,
            Self::GuildMemberRemove(_) => BotEventType::GuildMemberRemove,
            Self::Command(_) => BotEventType::Command,
            Self::Button(_) => BotEventType::Button,
            Self::ModalSubmit(_) => BotEventType::ModalSubmit,
        }
    }

    /// Guild the event happened in; `None` for READY and for DMs
    #[must_use]
    pub fn guild_id(&self) -> Option<Snowflake> {
        match self {
            Self::Ready(_) => None,
            Self::GuildMemberAdd(e) => Some(e.guild_id),
            Self::GuildMemberRemove(e) => Some(e.guild_id),
            Self::Command(e) => e.guild_id,
            Self::Button(e) => e.guild_id,
            Self::ModalSubmit(e) => e.guild_id,
        }
    }
}
