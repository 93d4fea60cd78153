use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::ApiError;

/// A user's saved city. (user, city) pairs are unique.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Favorite {
    pub id: i64,
    pub city: String,
}

impl Favorite {
    pub async fn add(db: &SqlitePool, user_id: i64, city: &str) -> Result<(), ApiError> {
        let res = sqlx::query("INSERT INTO favorites (user_id, city) VALUES (?, ?)")
            .bind(user_id)
            .bind(city)
            .execute(db)
            .await;
        match res {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
                Err(ApiError::Duplicate("City already in favorites".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(db: &SqlitePool, user_id: i64) -> Result<Vec<Favorite>, ApiError> {
        let rows =
            sqlx::query_as::<_, Favorite>("SELECT id, city FROM favorites WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(db)
                .await?;
        Ok(rows)
    }

    pub async fn remove(db: &SqlitePool, user_id: i64, city: &str) -> Result<(), ApiError> {
        let res = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND city = ?")
            .bind(user_id)
            .bind(city)
            .execute(db)
            .await?;
        if res.rows_affected() == 0 {
            return Err(ApiError::NotFound("City not found in favorites".into()));
        }
        Ok(())
    }
}
