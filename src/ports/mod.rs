//! Ports - interfaces between the domain and the outside world.

mod card_repository;
mod chat_provider;
mod insight_repository;
mod session_repository;
mod user_repository;

pub use card_repository::CardRepository;
pub use chat_provider::{ChatProvider, ChatRequest, ProviderError, ProviderHandle, ProviderInfo};
pub use insight_repository::InsightRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

/// Storage failures shared by all repository ports.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(String),

    /// Stored payload could not be decoded into a domain type.
    #[error("corrupt stored data: {0}")]
    Corrupt(String),
}

impl RepositoryError {
    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Creates a corrupt-data error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }
}
