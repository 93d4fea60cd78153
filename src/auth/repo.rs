use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use crate::auth::password::hash_password;
use crate::error::ApiError;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String, // salted hash, never exposed in JSON
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

impl User {
    pub async fn find_by_username(
        db: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, email, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn create(
        db: &SqlitePool,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<User, ApiError> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, email)
            VALUES (?, ?, ?)
            RETURNING id, username, password, email, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .fetch_one(db)
        .await;
        match res {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
                Err(ApiError::Duplicate("Username or email already exists".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Seed the demo account if it does not exist yet.
    pub async fn ensure_demo(db: &SqlitePool) -> Result<(), ApiError> {
        if User::find_by_username(db, "demo").await?.is_some() {
            return Ok(());
        }
        let hash = hash_password("password");
        let user = User::create(db, "demo", &hash, Some("demo@example.com")).await?;
        info!(user_id = user.id, "demo user seeded");
        Ok(())
    }
}
