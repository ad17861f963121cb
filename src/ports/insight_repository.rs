//! Joy insight repository port.

use async_trait::async_trait;

use crate::domain::foundation::{InsightId, UserId};
use crate::domain::insight::JoyInsight;

use super::RepositoryError;

/// Storage for mined joy insights.
#[async_trait]
pub trait InsightRepository: Send + Sync {
    /// Persists a new insight.
    async fn create(&self, insight: &JoyInsight) -> Result<(), RepositoryError>;

    /// Loads one insight owned by the user.
    async fn find_by_id(
        &self,
        id: &InsightId,
        user_id: &UserId,
    ) -> Result<Option<JoyInsight>, RepositoryError>;

    /// Lists the user's insights, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<JoyInsight>, RepositoryError>;

    /// Writes back updated confirmed/rejected flags.
    async fn update(&self, insight: &JoyInsight) -> Result<(), RepositoryError>;
}
