//! Joy card repository port.

use async_trait::async_trait;

use crate::domain::card::JoyCard;
use crate::domain::foundation::{CardId, UserId};

use super::RepositoryError;

/// Storage for finalized joy cards.
///
/// Every read is scoped to the owning user.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Persists a new card.
    async fn create(&self, card: &JoyCard) -> Result<(), RepositoryError>;

    /// Loads one card owned by the user.
    async fn find_by_id(
        &self,
        id: &CardId,
        user_id: &UserId,
    ) -> Result<Option<JoyCard>, RepositoryError>;

    /// Lists the user's cards, newest first, with paging.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<JoyCard>, RepositoryError>;

    /// All of the user's cards, newest first.
    async fn list_all_by_user(&self, user_id: &UserId) -> Result<Vec<JoyCard>, RepositoryError>;

    /// Counts the user's cards.
    async fn count_by_user(&self, user_id: &UserId) -> Result<i64, RepositoryError>;

    /// Deletes a card owned by the user. Returns false when nothing matched.
    async fn delete(&self, id: &CardId, user_id: &UserId) -> Result<bool, RepositoryError>;
}
