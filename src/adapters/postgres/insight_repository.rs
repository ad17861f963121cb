//! PostgreSQL implementation of InsightRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{InsightId, Timestamp, UserId};
use crate::domain::insight::JoyInsight;
use crate::ports::{InsightRepository, RepositoryError};

use super::{db_error, decode_json, encode_json};

const SELECT_INSIGHT: &str = r#"
    SELECT id, user_id, insight_text, statement, keywords, evidence, pattern_type,
           is_confirmed, is_rejected, created_at, updated_at
    FROM joy_insights
"#;

/// PostgreSQL implementation of [`InsightRepository`].
#[derive(Clone)]
pub struct PostgresInsightRepository {
    pool: PgPool,
}

impl PostgresInsightRepository {
    /// Creates a new repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightRepository for PostgresInsightRepository {
    async fn create(&self, insight: &JoyInsight) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO joy_insights (
                id, user_id, insight_text, statement, keywords, evidence, pattern_type,
                is_confirmed, is_rejected, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(insight.id.as_uuid())
        .bind(insight.user_id.as_uuid())
        .bind(&insight.insight_text)
        .bind(&insight.statement)
        .bind(encode_json("keywords", &insight.keywords)?)
        .bind(encode_json("evidence", &insight.evidence)?)
        .bind(&insight.pattern_type)
        .bind(insight.is_confirmed)
        .bind(insight.is_rejected)
        .bind(insight.created_at.as_datetime())
        .bind(insight.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("failed to insert insight", e))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &InsightId,
        user_id: &UserId,
    ) -> Result<Option<JoyInsight>, RepositoryError> {
        let row = sqlx::query(&format!(
            "{} WHERE id = $1 AND user_id = $2",
            SELECT_INSIGHT
        ))
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("failed to load insight", e))?;

        row.map(row_to_insight).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<JoyInsight>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_INSIGHT
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("failed to list insights", e))?;

        rows.into_iter().map(row_to_insight).collect()
    }

    async fn update(&self, insight: &JoyInsight) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE joy_insights
            SET is_confirmed = $1, is_rejected = $2, updated_at = $3
            WHERE id = $4
            "#,
        )
        .bind(insight.is_confirmed)
        .bind(insight.is_rejected)
        .bind(insight.updated_at.as_datetime())
        .bind(insight.id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("failed to update insight", e))?;

        Ok(())
    }
}

fn row_to_insight(row: sqlx::postgres::PgRow) -> Result<JoyInsight, RepositoryError> {
    let read = |e: sqlx::Error| db_error("failed to read insight row", e);

    let keywords: String = row.try_get("keywords").map_err(read)?;
    let evidence: String = row.try_get("evidence").map_err(read)?;

    Ok(JoyInsight {
        id: InsightId::from_uuid(row.try_get("id").map_err(read)?),
        user_id: UserId::from_uuid(row.try_get("user_id").map_err(read)?),
        insight_text: row.try_get("insight_text").map_err(read)?,
        statement: row.try_get("statement").map_err(read)?,
        keywords: decode_json("keywords", &keywords)?,
        evidence: decode_json("evidence", &evidence)?,
        pattern_type: row.try_get("pattern_type").map_err(read)?,
        is_confirmed: row.try_get("is_confirmed").map_err(read)?,
        is_rejected: row.try_get("is_rejected").map_err(read)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(read)?),
        updated_at: Timestamp::from_datetime(row.try_get("updated_at").map_err(read)?),
    })
}
