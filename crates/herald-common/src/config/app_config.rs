//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use herald_core::Snowflake;
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub scheduler: SchedulerConfig,
    pub health: HealthConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Chat platform settings
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub token: String,
    /// The one guild this bot serves; events from anywhere else are ignored
    pub guild_id: Snowflake,
    /// Members with this role may create giveaways
    pub owner_role_id: Snowflake,
    #[serde(default = "default_embed_color")]
    pub embed_color: u32,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Giveaway sweep settings
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

/// Health web view bind address
#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_health_host")]
    pub host: String,
    #[serde(default = "default_health_port")]
    pub port: u16,
}

impl HealthConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Default value functions
fn default_app_name() -> String {
    "herald".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_embed_color() -> u32 {
    0x5865_F2
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_sweep_interval() -> u64 {
    30
}

fn default_health_host() -> String {
    "0.0.0.0".to_string()
}

fn default_health_port() -> u16 {
    3000
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            bot: BotConfig {
                token: lookup("DISCORD_TOKEN")
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(ConfigError::MissingVar("DISCORD_TOKEN"))?,
                guild_id: required_snowflake(&lookup, "GUILD_ID")?,
                owner_role_id: required_snowflake(&lookup, "OWNER_ROLE_ID")?,
                embed_color: match lookup("EMBED_COLOR") {
                    Some(raw) => parse_color(&raw)
                        .ok_or(ConfigError::InvalidValue("EMBED_COLOR", raw))?,
                    None => default_embed_color(),
                },
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: lookup("DATABASE_MIN_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            scheduler: SchedulerConfig {
                sweep_interval_secs: lookup("GIVEAWAY_SWEEP_INTERVAL_SECS")
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or_else(default_sweep_interval),
            },
            health: HealthConfig {
                host: lookup("HEALTH_HOST").unwrap_or_else(default_health_host),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_health_port),
            },
        })
    }
}

fn required_snowflake<F>(lookup: &F, key: &'static str) -> Result<Snowflake, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or(ConfigError::MissingVar(key))?;
    Snowflake::parse(&raw).map_err(|_| ConfigError::InvalidValue(key, raw))
}

/// Accepts `0x5865F2`, `#5865F2` or a decimal number
fn parse_color(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let hex = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .or_else(|| raw.strip_prefix('#'));

    let color = match hex {
        Some(digits) => u32::from_str_radix(digits, 16).ok(),
        None => raw.parse().ok(),
    };
    color.filter(|color| *color <= 0xFF_FFFF)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
