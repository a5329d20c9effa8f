//! Slash command handler

use tracing::warn;

use herald_service::StatsService;

use super::{EventDispatcher, HandlerError, HandlerResult, Reply};
use crate::events::ids::{COMMAND_GIVEAWAY, COMMAND_HELP, COMMAND_INVITES};
use crate::events::CommandEvent;

/// Handles `/invites`, `/giveaway` and `/help`
pub struct CommandHandler;

impl CommandHandler {
    pub async fn handle(dispatcher: &EventDispatcher, event: CommandEvent) -> HandlerResult<Reply> {
        match event.name.as_str() {
            COMMAND_INVITES => {
                let target = event.target_user.unwrap_or(event.user_id);
                let stats = StatsService::new(dispatcher.context())
                    .get_stats(target)
                    .await?;
                Ok(Reply::Stats(stats))
            }
            COMMAND_GIVEAWAY => {
                if !event.has_role(dispatcher.settings().owner_role_id) {
                    return Err(HandlerError::Forbidden);
                }
                Ok(Reply::OpenGiveawayForm)
            }
            COMMAND_HELP => Ok(Reply::Help),
            other => {
                warn!(command = other, "Unknown command");
                Err(HandlerError::InvalidPayload(format!("unknown command: {other}")))
            }
        }
    }
}
