//! Member join/leave handlers

use chrono::{DateTime, Utc};
use tracing::debug;

use herald_service::AttributionService;

use super::{EventDispatcher, HandlerResult, Reply};
use crate::events::{MemberAddEvent, MemberRemoveEvent};

/// GUILD_MEMBER_ADD handler
pub struct MemberAddHandler;

impl MemberAddHandler {
    pub async fn handle(
        dispatcher: &EventDispatcher,
        event: MemberAddEvent,
        now: DateTime<Utc>,
    ) -> HandlerResult<Reply> {
        let result = AttributionService::new(dispatcher.context())
            .member_joined(event.guild_id, event.user_id, event.account_created_at, now)
            .await;

        match result {
            Ok(_) => Ok(Reply::None),
            Err(e) if e.is_no_attribution() => {
                debug!(user_id = %event.user_id, "Join not attributed");
                Ok(Reply::None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// GUILD_MEMBER_REMOVE handler
pub struct MemberRemoveHandler;

impl MemberRemoveHandler {
    pub async fn handle(
        dispatcher: &EventDispatcher,
        event: MemberRemoveEvent,
    ) -> HandlerResult<Reply> {
        AttributionService::new(dispatcher.context())
            .member_left(event.user_id)
            .await?;
        Ok(Reply::None)
    }
}
