//! Herald bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p herald-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use herald_common::{try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Log format follows APP_ENV; defaults apply when the configuration is broken
    let tracing_config = config
        .as_ref()
        .map(|config| TracingConfig::for_environment(config.app.env))
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        error!(code = e.error_code(), error = %e, "Bot failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    info!(
        env = ?config.app.env,
        guild_id = %config.bot.guild_id,
        port = config.health.port,
        sweep_interval_secs = config.scheduler.sweep_interval_secs,
        "Starting Herald"
    );

    herald_gateway::run(config).await?;

    info!("Herald stopped");
    Ok(())
}
