//! In-memory InsightRepository.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{InsightId, UserId};
use crate::domain::insight::JoyInsight;
use crate::ports::{InsightRepository, RepositoryError};

/// In-memory implementation of [`InsightRepository`].
#[derive(Debug, Default)]
pub struct InMemoryInsightRepository {
    insights: Mutex<Vec<JoyInsight>>,
}

impl InMemoryInsightRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InsightRepository for InMemoryInsightRepository {
    async fn create(&self, insight: &JoyInsight) -> Result<(), RepositoryError> {
        self.insights.lock().unwrap().push(insight.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &InsightId,
        user_id: &UserId,
    ) -> Result<Option<JoyInsight>, RepositoryError> {
        Ok(self
            .insights
            .lock()
            .unwrap()
            .iter()
            .find(|insight| insight.id == *id && insight.user_id == *user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<JoyInsight>, RepositoryError> {
        let mut insights: Vec<JoyInsight> = self
            .insights
            .lock()
            .unwrap()
            .iter()
            .filter(|insight| insight.user_id == *user_id)
            .cloned()
            .collect();
        insights.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(insights)
    }

    async fn update(&self, insight: &JoyInsight) -> Result<(), RepositoryError> {
        let mut insights = self.insights.lock().unwrap();
        if let Some(slot) = insights.iter_mut().find(|i| i.id == insight.id) {
            *slot = insight.clone();
            Ok(())
        } else {
            Err(RepositoryError::database("insight not found for update"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::insight::MinedInsight;

    #[tokio::test]
    async fn flags_survive_update() {
        let repo = InMemoryInsightRepository::new();
        let user = UserId::new();
        let mut insight = JoyInsight::from_mined(
            user,
            MinedInsight {
                insight: "x".into(),
                ..Default::default()
            },
        );
        repo.create(&insight).await.unwrap();

        insight.confirm();
        repo.update(&insight).await.unwrap();

        let found = repo.find_by_id(&insight.id, &user).await.unwrap().unwrap();
        assert!(found.is_confirmed);
    }
}
