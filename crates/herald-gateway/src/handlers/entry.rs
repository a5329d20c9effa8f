//! Giveaway entry button handler

use herald_service::GiveawayService;

use super::{EventDispatcher, HandlerError, HandlerResult, Reply};
use crate::events::ids::JOIN_BUTTON;
use crate::events::ButtonEvent;

/// Enters the presser into the giveaway announced by the pressed message
pub struct EntryHandler;

impl EntryHandler {
    pub async fn handle(dispatcher: &EventDispatcher, event: ButtonEvent) -> HandlerResult<Reply> {
        if event.custom_id != JOIN_BUTTON {
            return Err(HandlerError::InvalidPayload(format!(
                "unknown button: {}",
                event.custom_id
            )));
        }

        let service = GiveawayService::new(dispatcher.context());
        service.enter(event.message_id, event.user_id).await?;
        let giveaway = service.get(event.message_id).await?;

        Ok(Reply::EntryAccepted(giveaway))
    }
}
