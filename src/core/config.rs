//! Environment-based configuration
//!
//! All runtime settings come from environment variables (loaded from `.env`
//! by the binary before this runs). Only the Discord token and the OpenAI
//! key are required; everything else has a sensible default.

use anyhow::{Context, Result};
use std::env;

/// Runtime configuration for the bot process
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (required)
    pub discord_token: String,
    /// OpenAI API key (required)
    pub openai_api_key: String,
    /// Chat model used for all generation calls
    pub openai_model: String,
    /// Path to the SQLite file holding mute state
    pub database_path: String,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
    /// Optional guild id for instant command registration during development
    pub discord_guild_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN")
                .context("DISCORD_TOKEN must be set in the environment or .env file")?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set in the environment or .env file")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "impish.db".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            discord_guild_id: env::var("DISCORD_GUILD_ID").ok(),
        })
    }
}
