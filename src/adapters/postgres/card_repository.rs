//! PostgreSQL implementation of CardRepository.
//!
//! Formula fields are stored as individual columns, mirroring how the
//! cards are queried and displayed; the conversation snapshot is a JSON
//! text column.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::card::{Formula, JoyCard};
use crate::domain::foundation::{CardId, Timestamp, UserId};
use crate::ports::{CardRepository, RepositoryError};

use super::{db_error, decode_json, encode_json};

const SELECT_CARD: &str = r#"
    SELECT id, user_id, raw_input,
           formula_scene, formula_people, formula_event, formula_trigger, formula_sensation,
           card_summary, conversation_history, created_at, updated_at
    FROM joy_cards
"#;

/// PostgreSQL implementation of [`CardRepository`].
#[derive(Clone)]
pub struct PostgresCardRepository {
    pool: PgPool,
}

impl PostgresCardRepository {
    /// Creates a new repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardRepository for PostgresCardRepository {
    async fn create(&self, card: &JoyCard) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO joy_cards (
                id, user_id, raw_input,
                formula_scene, formula_people, formula_event, formula_trigger, formula_sensation,
                card_summary, conversation_history, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(card.id.as_uuid())
        .bind(card.user_id.as_uuid())
        .bind(&card.raw_input)
        .bind(&card.formula.scene)
        .bind(&card.formula.people)
        .bind(&card.formula.event)
        .bind(&card.formula.trigger)
        .bind(&card.formula.sensation)
        .bind(&card.card_summary)
        .bind(encode_json("conversation_history", &card.conversation_history)?)
        .bind(card.created_at.as_datetime())
        .bind(card.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("failed to insert card", e))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CardId,
        user_id: &UserId,
    ) -> Result<Option<JoyCard>, RepositoryError> {
        let row = sqlx::query(&format!("{} WHERE id = $1 AND user_id = $2", SELECT_CARD))
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to load card", e))?;

        row.map(row_to_card).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<JoyCard>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC OFFSET $2 LIMIT $3",
            SELECT_CARD
        ))
        .bind(user_id.as_uuid())
        .bind(skip.max(0))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("failed to list cards", e))?;

        rows.into_iter().map(row_to_card).collect()
    }

    async fn list_all_by_user(&self, user_id: &UserId) -> Result<Vec<JoyCard>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_CARD
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("failed to list cards", e))?;

        rows.into_iter().map(row_to_card).collect()
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM joy_cards WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("failed to count cards", e))?;

        row.try_get("total")
            .map_err(|e| db_error("failed to read card count", e))
    }

    async fn delete(&self, id: &CardId, user_id: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM joy_cards WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to delete card", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_card(row: sqlx::postgres::PgRow) -> Result<JoyCard, RepositoryError> {
    let read = |e: sqlx::Error| db_error("failed to read card row", e);

    let history: String = row.try_get("conversation_history").map_err(read)?;

    Ok(JoyCard {
        id: CardId::from_uuid(row.try_get("id").map_err(read)?),
        user_id: UserId::from_uuid(row.try_get("user_id").map_err(read)?),
        raw_input: row.try_get("raw_input").map_err(read)?,
        formula: Formula {
            scene: row.try_get("formula_scene").map_err(read)?,
            people: row.try_get("formula_people").map_err(read)?,
            event: row.try_get("formula_event").map_err(read)?,
            trigger: row.try_get("formula_trigger").map_err(read)?,
            sensation: row.try_get("formula_sensation").map_err(read)?,
        },
        card_summary: row.try_get("card_summary").map_err(read)?,
        conversation_history: decode_json("conversation_history", &history)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(read)?),
        updated_at: Timestamp::from_datetime(row.try_get("updated_at").map_err(read)?),
    })
}
