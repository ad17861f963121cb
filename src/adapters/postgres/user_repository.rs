//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{Language, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::{RepositoryError, UserRepository};

use super::db_error;

/// PostgreSQL implementation of [`UserRepository`].
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_identifier, display_name, language, created_at, last_active
            FROM users
            WHERE user_identifier = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("failed to load user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, user_identifier, display_name, language, created_at, last_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.user_identifier)
        .bind(&user.display_name)
        .bind(user.language.code())
        .bind(user.created_at.as_datetime())
        .bind(user.last_active.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("failed to insert user", e))?;

        Ok(())
    }

    async fn set_language(
        &self,
        id: &UserId,
        language: Language,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET language = $1 WHERE id = $2")
            .bind(language.code())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to update language", e))?;

        Ok(())
    }

    async fn touch(&self, id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET last_active = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to touch user", e))?;

        Ok(())
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> Result<User, RepositoryError> {
    let language: String = row
        .try_get("language")
        .map_err(|e| db_error("failed to read user row", e))?;

    Ok(User {
        id: UserId::from_uuid(
            row.try_get("id")
                .map_err(|e| db_error("failed to read user row", e))?,
        ),
        user_identifier: row
            .try_get("user_identifier")
            .map_err(|e| db_error("failed to read user row", e))?,
        display_name: row
            .try_get("display_name")
            .map_err(|e| db_error("failed to read user row", e))?,
        language: language.parse().unwrap_or_default(),
        created_at: Timestamp::from_datetime(
            row.try_get("created_at")
                .map_err(|e| db_error("failed to read user row", e))?,
        ),
        last_active: Timestamp::from_datetime(
            row.try_get("last_active")
                .map_err(|e| db_error("failed to read user row", e))?,
        ),
    })
}
