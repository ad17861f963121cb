//! Configuration error types.

use thiserror::Error;

/// Errors while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from semantic validation of loaded configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required setting: {0}")]
    MissingRequired(&'static str),

    #[error("invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ValidationError {
    /// Creates an invalid-setting error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            reason: reason.into(),
        }
    }
}
