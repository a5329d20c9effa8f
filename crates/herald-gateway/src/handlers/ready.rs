//! READY handler

use tracing::warn;

use herald_service::AttributionService;

use super::{EventDispatcher, HandlerResult, Reply};
use crate::events::ReadyEvent;

/// Takes the invite baseline of the served guild
pub struct ReadyHandler;

impl ReadyHandler {
    pub async fn handle(dispatcher: &EventDispatcher, event: ReadyEvent) -> HandlerResult<Reply> {
        let guild_id = dispatcher.settings().guild_id;
        if !event.guild_ids.is_empty() && !event.guild_ids.contains(&guild_id) {
            warn!(guild_id = %guild_id, "Bot is not a member of the configured guild");
            return Ok(Reply::None);
        }

        AttributionService::new(dispatcher.context())
            .prime(guild_id)
            .await?;
        Ok(Reply::None)
    }
}
