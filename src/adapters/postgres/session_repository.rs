//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{CardId, SessionId, Timestamp, UserId};
use crate::domain::session::{ChatSession, SessionStatus, SessionType};
use crate::ports::{RepositoryError, SessionRepository};

use super::{db_error, decode_json, encode_json};

/// PostgreSQL implementation of [`SessionRepository`].
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chat_sessions (
                id, user_id, session_type, status, joy_card_id, turns,
                created_at, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session_type_to_str(session.session_type))
        .bind(status_to_str(session.status))
        .bind(session.joy_card_id.map(|id| *id.as_uuid()))
        .bind(encode_json("turns", &session.turns)?)
        .bind(session.created_at.as_datetime())
        .bind(session.completed_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("failed to insert session", e))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SessionId,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, session_type, status, joy_card_id, turns,
                   created_at, completed_at
            FROM chat_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("failed to load session", e))?;

        row.map(row_to_session).transpose()
    }

    async fn update(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE chat_sessions
            SET status = $1, joy_card_id = $2, turns = $3, completed_at = $4
            WHERE id = $5
            "#,
        )
        .bind(status_to_str(session.status))
        .bind(session.joy_card_id.map(|id| *id.as_uuid()))
        .bind(encode_json("turns", &session.turns)?)
        .bind(session.completed_at.map(|t| *t.as_datetime()))
        .bind(session.id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("failed to update session", e))?;

        Ok(())
    }
}

fn status_to_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Active => "active",
        SessionStatus::Completed => "completed",
        SessionStatus::Abandoned => "abandoned",
    }
}

fn status_from_str(s: &str) -> Result<SessionStatus, RepositoryError> {
    match s {
        "active" => Ok(SessionStatus::Active),
        "completed" => Ok(SessionStatus::Completed),
        "abandoned" => Ok(SessionStatus::Abandoned),
        other => Err(RepositoryError::corrupt(format!(
            "unknown session status '{}'",
            other
        ))),
    }
}

fn session_type_to_str(session_type: SessionType) -> &'static str {
    match session_type {
        SessionType::CardCreation => "card_creation",
        SessionType::Exploration => "exploration",
    }
}

fn session_type_from_str(s: &str) -> Result<SessionType, RepositoryError> {
    match s {
        "card_creation" => Ok(SessionType::CardCreation),
        "exploration" => Ok(SessionType::Exploration),
        other => Err(RepositoryError::corrupt(format!(
            "unknown session type '{}'",
            other
        ))),
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<ChatSession, RepositoryError> {
    let read = |e: sqlx::Error| db_error("failed to read session row", e);

    let session_type: String = row.try_get("session_type").map_err(read)?;
    let status: String = row.try_get("status").map_err(read)?;
    let turns: String = row.try_get("turns").map_err(read)?;
    let joy_card_id: Option<Uuid> = row.try_get("joy_card_id").map_err(read)?;
    let completed_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("completed_at").map_err(read)?;

    Ok(ChatSession {
        id: SessionId::from_uuid(row.try_get("id").map_err(read)?),
        user_id: UserId::from_uuid(row.try_get("user_id").map_err(read)?),
        session_type: session_type_from_str(&session_type)?,
        status: status_from_str(&status)?,
        joy_card_id: joy_card_id.map(CardId::from_uuid),
        turns: decode_json("turns", &turns)?,
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(read)?),
        completed_at: completed_at.map(Timestamp::from_datetime),
    })
}
