//! Application configuration module.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `JOYFORMULA` prefix
//! with `__` separating nested values, e.g.
//! `JOYFORMULA__SERVER__PORT=8000` or `JOYFORMULA__AI__PROVIDER=openai`.

mod ai;
mod database;
mod error;
mod server;

pub use ai::{AiConfig, ProviderKind};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection).
    pub database: DatabaseConfig,

    /// AI provider configuration.
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file first when present (development), then
    /// environment variables with the `JOYFORMULA` prefix.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("JOYFORMULA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
