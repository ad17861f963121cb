//! PostgreSQL repository adapters.
//!
//! Runtime-bound sqlx queries; structured payloads (turns, keywords,
//! evidence) are stored as JSON text columns and decoded through serde on
//! the way out.

mod card_repository;
mod insight_repository;
mod session_repository;
mod user_repository;

pub use card_repository::PostgresCardRepository;
pub use insight_repository::PostgresInsightRepository;
pub use session_repository::PostgresSessionRepository;
pub use user_repository::PostgresUserRepository;

use crate::ports::RepositoryError;

fn db_error(context: &str, error: sqlx::Error) -> RepositoryError {
    RepositoryError::database(format!("{}: {}", context, error))
}

fn decode_json<T: serde::de::DeserializeOwned>(
    column: &str,
    raw: &str,
) -> Result<T, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::corrupt(format!("column {}: {}", column, e)))
}

fn encode_json<T: serde::Serialize>(column: &str, value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value)
        .map_err(|e| RepositoryError::corrupt(format!("column {}: {}", column, e)))
}
