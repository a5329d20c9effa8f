//! Event handlers
//!
//! Routes bot events to the handler for their kind.

mod command;
mod entry;
mod error;
mod member;
mod modal;
mod ready;
mod reply;

pub use command::CommandHandler;
pub use entry::EntryHandler;
pub use error::{HandlerError, HandlerResult};
pub use member::{MemberAddHandler, MemberRemoveHandler};
pub use modal::ModalHandler;
pub use ready::ReadyHandler;
pub use reply::Reply;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use herald_common::BotConfig;
use herald_core::{GiveawayDraft, Snowflake};
use herald_service::dto::GiveawayResponse;
use herald_service::{GiveawayService, ServiceContext};

use crate::events::BotEvent;

/// Guild scoping and permissions for dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    /// The only guild whose events are handled
    pub guild_id: Snowflake,
    /// Role allowed to create giveaways
    pub owner_role_id: Snowflake,
}

impl From<&BotConfig> for DispatchSettings {
    fn from(config: &BotConfig) -> Self {
        Self {
            guild_id: config.guild_id,
            owner_role_id: config.owner_role_id,
        }
    }
}

/// Dispatch bot events to the appropriate handlers
#[derive(Clone)]
pub struct EventDispatcher {
    ctx: ServiceContext,
    settings: DispatchSettings,
}

impl EventDispatcher {
    pub fn new(ctx: ServiceContext, settings: DispatchSettings) -> Self {
        Self { ctx, settings }
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Handle an event at the current time
    pub async fn dispatch(&self, event: BotEvent) -> HandlerResult<Reply> {
        self.dispatch_at(event, Utc::now()).await
    }

    /// Handle an event as if it arrived at `now`
    #[instrument(skip(self, event, now), fields(event = %event.event_type()))]
    pub async fn dispatch_at(&self, event: BotEvent, now: DateTime<Utc>) -> HandlerResult<Reply> {
        if let BotEvent::Ready(ready) = event {
            return ReadyHandler::handle(self, ready).await;
        }

        if event.guild_id() != Some(self.settings.guild_id) {
            debug!(guild_id = ?event.guild_id(), "Ignoring event outside the served guild");
            return Ok(Reply::None);
        }

        match event {
            BotEvent::GuildMemberAdd(e) => MemberAddHandler::handle(self, e, now).await,
            BotEvent::GuildMemberRemove(e) => MemberRemoveHandler::handle(self, e).await,
            BotEvent::Command(e) => CommandHandler::handle(self, e).await,
            BotEvent::Button(e) => EntryHandler::handle(self, e).await,
            BotEvent::ModalSubmit(e) => ModalHandler::handle(self, &e, now),
            BotEvent::Ready(_) => Ok(Reply::None),
        }
    }

    /// Persist a giveaway whose announcement was posted as `message_id`
    pub async fn giveaway_announced(
        &self,
        draft: GiveawayDraft,
        message_id: Snowflake,
        channel_id: Snowflake,
    ) -> HandlerResult<GiveawayResponse> {
        Ok(GiveawayService::new(&self.ctx)
            .create(draft, message_id, channel_id)
            .await?)
    }
}
