//! In-memory CardRepository.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::card::JoyCard;
use crate::domain::foundation::{CardId, UserId};
use crate::ports::{CardRepository, RepositoryError};

/// In-memory implementation of [`CardRepository`].
#[derive(Debug, Default)]
pub struct InMemoryCardRepository {
    cards: Mutex<Vec<JoyCard>>,
}

impl InMemoryCardRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_for_user(&self, user_id: &UserId) -> Vec<JoyCard> {
        let mut cards: Vec<JoyCard> = self
            .cards
            .lock()
            .unwrap()
            .iter()
            .filter(|card| card.user_id == *user_id)
            .cloned()
            .collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        cards
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn create(&self, card: &JoyCard) -> Result<(), RepositoryError> {
        self.cards.lock().unwrap().push(card.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CardId,
        user_id: &UserId,
    ) -> Result<Option<JoyCard>, RepositoryError> {
        Ok(self
            .cards
            .lock()
            .unwrap()
            .iter()
            .find(|card| card.id == *id && card.user_id == *user_id)
            .cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<JoyCard>, RepositoryError> {
        Ok(self
            .sorted_for_user(user_id)
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn list_all_by_user(&self, user_id: &UserId) -> Result<Vec<JoyCard>, RepositoryError> {
        Ok(self.sorted_for_user(user_id))
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<i64, RepositoryError> {
        Ok(self
            .cards
            .lock()
            .unwrap()
            .iter()
            .filter(|card| card.user_id == *user_id)
            .count() as i64)
    }

    async fn delete(&self, id: &CardId, user_id: &UserId) -> Result<bool, RepositoryError> {
        let mut cards = self.cards.lock().unwrap();
        let before = cards.len();
        cards.retain(|card| !(card.id == *id && card.user_id == *user_id));
        Ok(cards.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::Formula;

    fn card_for(user: UserId, raw: &str) -> JoyCard {
        JoyCard::new(user, raw, Formula::default(), None, Vec::new())
    }

    #[tokio::test]
    async fn listing_is_scoped_to_user() {
        let repo = InMemoryCardRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();
        repo.create(&card_for(alice, "a")).await.unwrap();
        repo.create(&card_for(bob, "b")).await.unwrap();

        assert_eq!(repo.count_by_user(&alice).await.unwrap(), 1);
        let cards = repo.list_all_by_user(&alice).await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].raw_input, "a");
    }

    #[tokio::test]
    async fn paging_skips_and_limits() {
        let repo = InMemoryCardRepository::new();
        let user = UserId::new();
        for i in 0..5 {
            repo.create(&card_for(user, &format!("card {}", i)))
                .await
                .unwrap();
        }

        let page = repo.list_by_user(&user, 1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn delete_requires_matching_owner() {
        let repo = InMemoryCardRepository::new();
        let user = UserId::new();
        let card = card_for(user, "mine");
        repo.create(&card).await.unwrap();

        assert!(!repo.delete(&card.id, &UserId::new()).await.unwrap());
        assert!(repo.delete(&card.id, &user).await.unwrap());
        assert_eq!(repo.count_by_user(&user).await.unwrap(), 0);
    }
}
