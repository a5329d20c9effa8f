//! `ChatPlatform` over the Discord REST API

use std::num::NonZeroU64;
use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ChannelId, CreateMessage, EditMessage, GuildId, Http, MessageId};
use tracing::{instrument, warn};

use herald_core::traits::{ChatPlatform, RepoResult};
use herald_core::{DomainError, GiveawayOutcome, InviteUsage, Snowflake};

use super::render;

/// Convert a platform ID into a snowflake
pub fn snowflake(id: impl Into<u64>) -> Snowflake {
    Snowflake::from_u64(id.into())
}

/// Convert a snowflake into a platform ID; serenity IDs are never zero
pub fn platform_id<T: From<NonZeroU64>>(id: Snowflake) -> RepoResult<T> {
    NonZeroU64::new(id.as_u64())
        .map(T::from)
        .ok_or_else(|| DomainError::CollaboratorUnavailable(format!("invalid platform id {id}")))
}

fn unavailable(err: serenity::Error) -> DomainError {
    DomainError::CollaboratorUnavailable(err.to_string())
}

/// Discord implementation of the platform port
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    #[instrument(skip(self))]
    async fn fetch_invites(&self, guild_id: Snowflake) -> RepoResult<Vec<InviteUsage>> {
        let guild: GuildId = platform_id(guild_id)?;
        let invites = guild.invites(&*self.http).await.map_err(unavailable)?;

        Ok(invites
            .into_iter()
            .map(|invite| {
                InviteUsage::new(
                    invite.code,
                    invite.uses,
                    invite.inviter.map(|user| snowflake(user.id)),
                )
            })
            .collect())
    }

    #[instrument(skip(self, outcome), fields(giveaway_id = %outcome.giveaway_id))]
    async fn publish_giveaway_result(&self, outcome: &GiveawayOutcome) -> RepoResult<()> {
        let channel: ChannelId = platform_id(outcome.channel_id)?;
        let message: MessageId = platform_id(outcome.giveaway_id)?;

        let edited = channel
            .edit_message(
                &*self.http,
                message,
                EditMessage::new()
                    .embed(render::ended_embed(outcome))
                    .components(vec![]),
            )
            .await
            .map_err(unavailable);
        if let Err(e) = &edited {
            warn!(error = %e, "Could not update giveaway announcement");
        }

        for text in render::congratulations(outcome) {
            channel
                .send_message(&*self.http, CreateMessage::new().content(text))
                .await
                .map_err(unavailable)?;
        }

        edited.map(|_| ())
    }
}
