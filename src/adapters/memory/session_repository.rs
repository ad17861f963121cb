//! In-memory SessionRepository.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::session::ChatSession;
use crate::ports::{RepositoryError, SessionRepository};

/// In-memory implementation of [`SessionRepository`].
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<Vec<ChatSession>>,
}

impl InMemorySessionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SessionId,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|session| session.id == *id)
            .cloned())
    }

    async fn update(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(slot) = sessions.iter_mut().find(|s| s.id == session.id) {
            *slot = session.clone();
            Ok(())
        } else {
            Err(RepositoryError::database("session not found for update"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn update_replaces_stored_session() {
        let repo = InMemorySessionRepository::new();
        let mut session = ChatSession::card_creation(UserId::new());
        repo.create(&session).await.unwrap();

        session.abandon().unwrap();
        repo.update(&session).await.unwrap();

        let found = repo.find_by_id(&session.id).await.unwrap().unwrap();
        assert!(!found.is_active());
    }

    #[tokio::test]
    async fn updating_unknown_session_fails() {
        let repo = InMemorySessionRepository::new();
        let session = ChatSession::card_creation(UserId::new());
        assert!(repo.update(&session).await.is_err());
    }
}
