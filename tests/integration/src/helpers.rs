//! Test helpers for integration tests
//!
//! `TestBot` stands in for the Discord client: it feeds events to the real
//! dispatcher the way the serenity handler does. `TestServer` runs the
//! health view on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use herald_core::{GiveawayDraft, Snowflake};
use herald_gateway::events::{
    BotEvent, ButtonEvent, CommandEvent, MemberAddEvent, MemberRemoveEvent, ReadyEvent,
};
use herald_gateway::events::ids::{COMMAND_GIVEAWAY, COMMAND_INVITES, JOIN_BUTTON};
use herald_gateway::handlers::HandlerResult;
use herald_gateway::{create_app, BotStatus, DispatchSettings, EventDispatcher, HealthState, Reply};
use herald_service::dto::{GiveawayResponse, StatsResponse};
use herald_service::testing::{memory_context, FakePlatform};
use herald_service::{GiveawayScheduler, SweepReport};

use crate::fixtures::{GiveawayForm, CHANNEL_ID, GUILD_ID, OWNER_ROLE_ID};

/// The bot wired over in-memory storage and a recording platform
pub struct TestBot {
    pub dispatcher: EventDispatcher,
    pub platform: Arc<FakePlatform>,
    pub scheduler: GiveawayScheduler,
}

impl TestBot {
    pub fn new() -> Self {
        let platform = Arc::new(FakePlatform::new());
        let ctx = memory_context(platform.clone());
        let scheduler = GiveawayScheduler::new(ctx.clone(), Duration::from_secs(30));
        let dispatcher = EventDispatcher::new(
            ctx,
            DispatchSettings {
                guild_id: GUILD_ID,
                owner_role_id: OWNER_ROLE_ID,
            },
        );

        Self {
            dispatcher,
            platform,
            scheduler,
        }
    }

    /// Deliver READY for the served guild
    pub async fn ready(&self) -> Result<()> {
        self.dispatcher
            .dispatch(BotEvent::Ready(ReadyEvent {
                guild_ids: vec![GUILD_ID],
            }))
            .await?;
        Ok(())
    }

    /// A member joins; account age comes from the user ID
    pub async fn join(&self, user_id: Snowflake) -> Result<()> {
        self.dispatcher
            .dispatch(BotEvent::GuildMemberAdd(MemberAddEvent::new(GUILD_ID, user_id)))
            .await?;
        Ok(())
    }

    pub async fn leave(&self, user_id: Snowflake) -> Result<()> {
        self.dispatcher
            .dispatch(BotEvent::GuildMemberRemove(MemberRemoveEvent {
                guild_id: GUILD_ID,
                user_id,
            }))
            .await?;
        Ok(())
    }

    /// Run a slash command
    pub async fn command(
        &self,
        name: &str,
        user_id: Snowflake,
        roles: Vec<Snowflake>,
        target_user: Option<Snowflake>,
    ) -> HandlerResult<Reply> {
        self.dispatcher
            .dispatch(BotEvent::Command(CommandEvent {
                guild_id: Some(GUILD_ID),
                channel_id: CHANNEL_ID,
                user_id,
                member_roles: roles,
                name: name.to_string(),
                target_user,
            }))
            .await
    }

    /// `/invites` for `target`
    pub async fn invites(&self, target: Snowflake) -> Result<StatsResponse> {
        match self
            .command(COMMAND_INVITES, target, vec![], Some(target))
            .await?
        {
            Reply::Stats(stats) => Ok(stats),
            other => anyhow::bail!("expected stats, got {other:?}"),
        }
    }

    /// Submit the creation form and return the draft to announce
    pub async fn submit(&self, form: GiveawayForm, at: DateTime<Utc>) -> Result<GiveawayDraft> {
        let event = BotEvent::ModalSubmit(form.into_event(Snowflake::new(1)));
        match self.dispatcher.dispatch_at(event, at).await? {
            Reply::AnnounceGiveaway(draft) => Ok(draft),
            other => anyhow::bail!("expected a draft, got {other:?}"),
        }
    }

    /// The whole owner flow: `/giveaway`, form, announcement as `message_id`
    pub async fn create_giveaway(
        &self,
        form: GiveawayForm,
        message_id: Snowflake,
        at: DateTime<Utc>,
    ) -> Result<GiveawayResponse> {
        let opened = self
            .command(COMMAND_GIVEAWAY, Snowflake::new(1), vec![OWNER_ROLE_ID], None)
            .await?;
        anyhow::ensure!(opened == Reply::OpenGiveawayForm, "form not opened: {opened:?}");

        let draft = self.submit(form, at).await?;
        Ok(self
            .dispatcher
            .giveaway_announced(draft, message_id, CHANNEL_ID)
            .await?)
    }

    /// Press the join button on an announcement
    pub async fn press(&self, message_id: Snowflake, user_id: Snowflake) -> HandlerResult<Reply> {
        self.dispatcher
            .dispatch(BotEvent::Button(ButtonEvent {
                guild_id: Some(GUILD_ID),
                channel_id: CHANNEL_ID,
                message_id,
                user_id,
                custom_id: JOIN_BUTTON.to_string(),
            }))
            .await
    }

    pub async fn sweep(&self, now_unix: i64) -> Result<SweepReport> {
        Ok(self.scheduler.sweep(now_unix).await?)
    }

    /// Health view state sharing this bot's context
    pub fn health_state(&self, status: Arc<BotStatus>) -> HealthState {
        HealthState::new(self.dispatcher.context().clone(), status, "herald")
    }
}

impl Default for TestBot {
    fn default() -> Self {
        Self::new()
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the health view on an ephemeral port
    pub async fn start(state: HealthState) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let app = create_app(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status only
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
