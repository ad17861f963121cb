//! Chat session repository port.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::session::ChatSession;

use super::RepositoryError;

/// Storage for chat sessions and their turn history.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a new session.
    async fn create(&self, session: &ChatSession) -> Result<(), RepositoryError>;

    /// Loads a session by id.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<ChatSession>, RepositoryError>;

    /// Writes back an updated session (turns, status, card reference).
    async fn update(&self, session: &ChatSession) -> Result<(), RepositoryError>;
}
