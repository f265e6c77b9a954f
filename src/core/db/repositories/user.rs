//! PostgreSQL user directory
//!
//! Uniqueness is enforced by the `users_username_key` constraint; inserts use
//! `ON CONFLICT DO NOTHING` so a lost race is reported as a duplicate rather
//! than a database error.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::db::directory::{DirectoryError, UserDirectory};
use crate::core::db::models::UserRecord;

/// User directory backed by the `users` table
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert(&self, record: UserRecord) -> Result<(), DirectoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(&record.username)
        .bind(&record.password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::Duplicate);
        }

        Ok(())
    }
}
