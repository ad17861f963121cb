//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{Language, UserId};
use crate::domain::user::User;

use super::RepositoryError;

/// Storage for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks up a user by external identifier.
    async fn find_by_identifier(&self, identifier: &str)
        -> Result<Option<User>, RepositoryError>;

    /// Persists a new user.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// Updates the user's language preference.
    async fn set_language(&self, id: &UserId, language: Language)
        -> Result<(), RepositoryError>;

    /// Bumps the last-active timestamp.
    async fn touch(&self, id: &UserId) -> Result<(), RepositoryError>;
}
