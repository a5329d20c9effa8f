//! Serenity event handler
//!
//! Translates gateway callbacks into [`BotEvent`]s, runs them through the
//! dispatcher and renders the [`Reply`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ActionRowComponent, CommandInteraction, ComponentInteraction, ConnectionStage, Context,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
    EditMessage, EventHandler, GuildId, Interaction, Member, ModalInteraction, Ready,
    ShardStageUpdateEvent, User,
};
use tracing::{debug, error, info, warn};

use herald_core::Snowflake;

use super::render;
use super::discord::{platform_id, snowflake};
use crate::events::ids::OPTION_USER;
use crate::events::{
    BotEvent, ButtonEvent, CommandEvent, MemberAddEvent, MemberRemoveEvent, ModalSubmitEvent,
    ReadyEvent,
};
use crate::handlers::{EventDispatcher, HandlerError, Reply};
use crate::server::BotStatus;

/// Gateway callbacks of the bot
pub struct BotHandler {
    dispatcher: EventDispatcher,
    status: Arc<BotStatus>,
    embed_color: u32,
}

impl BotHandler {
    pub fn new(dispatcher: EventDispatcher, status: Arc<BotStatus>, embed_color: u32) -> Self {
        Self {
            dispatcher,
            status,
            embed_color,
        }
    }

    fn log_failure(event: &str, err: &HandlerError) {
        if err.is_expected() {
            debug!(event, error = %err, "Event rejected");
        } else {
            error!(event, error = %err, "Event handling failed");
        }
    }

    /// Dispatch an event whose reply, if any, is not sent anywhere
    async fn run(&self, event: BotEvent) {
        let kind = event.event_type();
        if let Err(e) = self.dispatcher.dispatch(event).await {
            Self::log_failure(kind.as_str(), &e);
        }
    }

    async fn register_commands(&self, ctx: &Context) {
        let guild: GuildId = match platform_id(self.dispatcher.settings().guild_id) {
            Ok(guild) => guild,
            Err(e) => {
                error!(error = %e, "Cannot register commands");
                return;
            }
        };

        match guild.set_commands(ctx, render::commands()).await {
            Ok(commands) => info!(count = commands.len(), "Slash commands registered"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    async fn on_command(&self, ctx: &Context, command: CommandInteraction) {
        let target_user = command
            .data
            .options
            .iter()
            .find(|option| option.name == OPTION_USER)
            .and_then(|option| option.value.as_user_id());
        let target_name = target_user
            .and_then(|id| command.data.resolved.users.get(&id))
            .map_or_else(|| command.user.name.clone(), |user| user.name.clone());

        let event = BotEvent::Command(CommandEvent {
            guild_id: command.guild_id.map(snowflake),
            channel_id: snowflake(command.channel_id),
            user_id: snowflake(command.user.id),
            member_roles: command
                .member
                .as_ref()
                .map(|member| member.roles.iter().copied().map(snowflake).collect())
                .unwrap_or_default(),
            name: command.data.name.clone(),
            target_user: target_user.map(snowflake),
        });

        let response = match self.dispatcher.dispatch(event).await {
            Ok(Reply::Stats(stats)) => CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(render::stats_embed(
                    &stats,
                    &target_name,
                    self.embed_color,
                )),
            ),
            Ok(Reply::Help) => CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(render::help_embed(self.embed_color))
                    .ephemeral(true),
            ),
            Ok(Reply::OpenGiveawayForm) => {
                CreateInteractionResponse::Modal(render::giveaway_modal())
            }
            Ok(_) => ephemeral(render::OUTSIDE_GUILD_NOTICE.to_string()),
            Err(e) => {
                Self::log_failure("COMMAND", &e);
                ephemeral(e.user_message())
            }
        };

        if let Err(e) = command.create_response(ctx, response).await {
            warn!(command = %command.data.name, error = %e, "Failed to answer command");
        }
    }

    async fn on_component(&self, ctx: &Context, component: ComponentInteraction) {
        let event = BotEvent::Button(ButtonEvent {
            guild_id: component.guild_id.map(snowflake),
            channel_id: snowflake(component.channel_id),
            message_id: snowflake(component.message.id),
            user_id: snowflake(component.user.id),
            custom_id: component.data.custom_id.clone(),
        });

        if let Err(e) = component.defer_ephemeral(ctx).await {
            warn!(error = %e, "Failed to acknowledge button");
            return;
        }

        let content = match self.dispatcher.dispatch(event).await {
            Ok(Reply::EntryAccepted(giveaway)) => {
                let embed = render::giveaway_embed(
                    &giveaway.prize,
                    &giveaway.description,
                    giveaway.winner_count,
                    giveaway.participant_count,
                    giveaway.end_time_unix,
                    self.embed_color,
                );
                if let Err(e) = component
                    .channel_id
                    .edit_message(ctx, component.message.id, EditMessage::new().embed(embed))
                    .await
                {
                    warn!(giveaway_id = %giveaway.id, error = %e, "Failed to refresh announcement");
                }
                "✅ You're in!".to_string()
            }
            Ok(_) => render::OUTSIDE_GUILD_NOTICE.to_string(),
            Err(e) => {
                Self::log_failure("BUTTON", &e);
                e.user_message()
            }
        };

        if let Err(e) = component
            .edit_response(ctx, EditInteractionResponse::new().content(content))
            .await
        {
            warn!(error = %e, "Failed to answer button");
        }
    }

    async fn on_modal(&self, ctx: &Context, modal: ModalInteraction) {
        let event = BotEvent::ModalSubmit(ModalSubmitEvent {
            guild_id: modal.guild_id.map(snowflake),
            channel_id: snowflake(modal.channel_id),
            user_id: snowflake(modal.user.id),
            custom_id: modal.data.custom_id.clone(),
            fields: modal_fields(&modal),
        });

        let outcome = match self.dispatcher.dispatch(event).await {
            Ok(Reply::AnnounceGiveaway(draft)) => Ok(draft),
            Ok(_) => Err(render::OUTSIDE_GUILD_NOTICE.to_string()),
            Err(e) => {
                Self::log_failure("MODAL_SUBMIT", &e);
                Err(e.user_message())
            }
        };
        let draft = match outcome {
            Ok(draft) => draft,
            Err(content) => {
                if let Err(e) = modal.create_response(ctx, ephemeral(content)).await {
                    warn!(error = %e, "Failed to answer modal");
                }
                return;
            }
        };

        let announcement = CreateInteractionResponseMessage::new()
            .embed(render::giveaway_embed(
                &draft.prize,
                &draft.description,
                i32::try_from(draft.winner_count).unwrap_or(i32::MAX),
                0,
                draft.end_time_unix,
                self.embed_color,
            ))
            .components(vec![render::join_row()]);

        if let Err(e) = modal
            .create_response(ctx, CreateInteractionResponse::Message(announcement))
            .await
        {
            error!(error = %e, "Failed to post giveaway announcement");
            return;
        }

        let message = match modal.get_response(ctx).await {
            Ok(message) => message,
            Err(e) => {
                error!(error = %e, "Posted announcement could not be fetched");
                return;
            }
        };

        if let Err(e) = self
            .dispatcher
            .giveaway_announced(draft, snowflake(message.id), snowflake(message.channel_id))
            .await
        {
            error!(message_id = %message.id, error = %e, "Giveaway not stored; removing announcement");
            if let Err(e) = message.delete(ctx).await {
                warn!(error = %e, "Failed to remove orphaned announcement");
            }
        }
    }
}

fn ephemeral(content: String) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Text input values of a submitted modal, keyed by custom ID
fn modal_fields(modal: &ModalInteraction) -> HashMap<String, String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => input
                .value
                .clone()
                .map(|value| (input.custom_id.clone(), value)),
            _ => None,
        })
        .collect()
}

#[async_trait]
impl EventHandler for BotHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Bot online");
        self.status.set_connected(true);
        self.register_commands(&ctx).await;

        let guild_ids: Vec<Snowflake> = ready.guilds.iter().map(|g| snowflake(g.id)).collect();
        self.run(BotEvent::Ready(ReadyEvent { guild_ids })).await;
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        let connected = matches!(event.new, ConnectionStage::Connected);
        debug!(stage = ?event.new, "Shard stage changed");
        self.status.set_connected(connected);
    }

    async fn guild_member_addition(&self, _ctx: Context, new_member: Member) {
        let event = MemberAddEvent::new(snowflake(new_member.guild_id), snowflake(new_member.user.id));
        self.run(BotEvent::GuildMemberAdd(event)).await;
    }

    async fn guild_member_removal(
        &self,
        _ctx: Context,
        guild_id: GuildId,
        user: User,
        _member_data_if_available: Option<Member>,
    ) {
        self.run(BotEvent::GuildMemberRemove(MemberRemoveEvent {
            guild_id: snowflake(guild_id),
            user_id: snowflake(user.id),
        }))
        .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.on_command(&ctx, command).await,
            Interaction::Component(component) => self.on_component(&ctx, component).await,
            Interaction::Modal(modal) => self.on_modal(&ctx, modal).await,
            _ => {}
        }
    }
}
