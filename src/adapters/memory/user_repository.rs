//! In-memory UserRepository.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{Language, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::{RepositoryError, UserRepository};

/// In-memory implementation of [`UserRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.user_identifier == identifier)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn set_language(
        &self,
        id: &UserId,
        language: Language,
    ) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == *id) {
            user.language = language;
        }
        Ok(())
    }

    async fn touch(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == *id) {
            user.last_active = Timestamp::now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find_roundtrips() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("alice");
        repo.create(&user).await.unwrap();

        let found = repo.find_by_identifier("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.find_by_identifier("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_language_updates_user() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("alice");
        repo.create(&user).await.unwrap();

        repo.set_language(&user.id, Language::Zh).await.unwrap();
        let found = repo.find_by_identifier("alice").await.unwrap().unwrap();
        assert_eq!(found.language, Language::Zh);
    }
}
