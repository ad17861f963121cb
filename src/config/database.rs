//! Database configuration (PostgreSQL connection).

use serde::Deserialize;

use super::error::ValidationError;

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgres://...).
    pub url: String,

    /// Maximum pool connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Validates the database configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::invalid(
                "database.url",
                "must be a postgres:// URL",
            ));
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_postgres_url() {
        let config = DatabaseConfig {
            url: "postgres://localhost/joyformula".into(),
            max_connections: 5,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_postgres_url() {
        let config = DatabaseConfig {
            url: "mysql://localhost/joyformula".into(),
            max_connections: 5,
        };
        assert!(config.validate().is_err());
    }
}
