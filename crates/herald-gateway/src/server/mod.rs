//! Bot runtime setup
//!
//! Wires the database, the services, the giveaway scheduler, the health
//! view and the Discord client.

mod health;
mod state;

pub use state::{BotStatus, HealthState};

use std::sync::Arc;

use axum::{routing::get, Router};
use serenity::all::{Client, GatewayIntents, Http};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use herald_common::{AppConfig, AppError};
use herald_service::{GiveawayScheduler, ServiceContext, ServiceContextBuilder};

use crate::handlers::{DispatchSettings, EventDispatcher};
use crate::platform::{BotHandler, SerenityPlatform};

/// Create the health view router
pub fn create_router() -> Router<HealthState> {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Build the complete health application
pub fn create_app(state: HealthState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the health view until `shutdown` flips
pub async fn run_health_server(
    app: Router,
    addr: String,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Health view listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.changed().await;
        })
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("health server error: {e}")))
}

/// Connect to PostgreSQL and build the service context
pub async fn create_service_context(
    config: &AppConfig,
    http: Arc<Http>,
) -> Result<ServiceContext, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = herald_db::create_pool(&herald_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    herald_db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;
    info!("PostgreSQL connection established");

    Ok(ServiceContextBuilder::new()
        .postgres(pool)
        .platform(Arc::new(SerenityPlatform::new(http)))
        .build()?)
}

/// Run the bot until the gateway stops or Ctrl-C is received
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let http = Arc::new(Http::new(&config.bot.token));
    let ctx = create_service_context(&config, http).await?;
    let status = Arc::new(BotStatus::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler = GiveawayScheduler::from_config(ctx.clone(), &config.scheduler)
        .spawn(shutdown_rx.clone());

    let app = create_app(HealthState::new(
        ctx.clone(),
        status.clone(),
        &config.app.name,
    ));
    let health = tokio::spawn(run_health_server(
        app,
        config.health.address(),
        shutdown_rx,
    ));

    let dispatcher = EventDispatcher::new(ctx, DispatchSettings::from(&config.bot));
    let handler = BotHandler::new(dispatcher, status, config.bot.embed_color);
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS | GatewayIntents::GUILD_INVITES;

    let mut client = Client::builder(&config.bot.token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| AppError::Platform(e.to_string()))?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shard_manager.shutdown_all().await;
        }
    });

    info!("Connecting to Discord...");
    let result = client
        .start()
        .await
        .map_err(|e| AppError::Platform(e.to_string()));

    let _ = shutdown_tx.send(true);
    if let Err(e) = scheduler.await {
        error!(error = %e, "Giveaway scheduler task failed");
    }
    match health.await {
        Ok(Err(e)) => error!(error = %e, "Health view failed"),
        Err(e) => error!(error = %e, "Health view task failed"),
        Ok(Ok(())) => {}
    }

    result
}
