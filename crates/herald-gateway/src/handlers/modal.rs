//! Giveaway creation form handler

use chrono::{DateTime, Utc};

use herald_service::dto::CreateGiveawayRequest;
use herald_service::GiveawayService;

use super::{EventDispatcher, HandlerError, HandlerResult, Reply};
use crate::events::ids::{
    FIELD_DESCRIPTION, FIELD_DURATION, FIELD_PRIZE, FIELD_WINNERS, GIVEAWAY_MODAL,
};
use crate::events::ModalSubmitEvent;

/// Turns a submitted form into a giveaway draft
pub struct ModalHandler;

impl ModalHandler {
    pub fn handle(
        dispatcher: &EventDispatcher,
        event: &ModalSubmitEvent,
        now: DateTime<Utc>,
    ) -> HandlerResult<Reply> {
        if event.custom_id != GIVEAWAY_MODAL {
            return Err(HandlerError::InvalidPayload(format!(
                "unknown modal: {}",
                event.custom_id
            )));
        }

        let form = CreateGiveawayRequest::new(
            event.field(FIELD_PRIZE).unwrap_or_default(),
            event.field(FIELD_DESCRIPTION).unwrap_or_default(),
            event.field(FIELD_DURATION).map(str::to_string),
            event.field(FIELD_WINNERS).map(str::to_string),
        );

        let draft = GiveawayService::new(dispatcher.context()).draft(&form, now.timestamp())?;
        Ok(Reply::AnnounceGiveaway(draft))
    }
}
