use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::dto::WeatherReading;
use crate::error::ApiError;

/// Logged weather query. Immutable once written; the raw input city is stored
/// even when the returned reading carries a geocoded display name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeatherRecord {
    pub id: i64,
    pub user_id: i64,
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub description: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistoryEntry {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub description: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CityStats {
    pub city: String,
    pub search_count: i64,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_pressure: f64,
    pub avg_wind_speed: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct TemperaturePoint {
    pub city: String,
    pub temperature: f64,
    pub timestamp: NaiveDateTime,
}

impl WeatherRecord {
    pub async fn insert(
        db: &SqlitePool,
        user_id: i64,
        city: &str,
        reading: &WeatherReading,
    ) -> Result<(), ApiError> {
        sqlx::query(
            r#"
            INSERT INTO weather_data
            (user_id, city, temperature, humidity, pressure, wind_speed, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(city)
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.pressure)
        .bind(reading.wind_speed)
        .bind(&reading.description)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Records in the last `days` days, newest first. `days = 0` covers today
    /// from midnight forward.
    pub async fn history(
        db: &SqlitePool,
        user_id: i64,
        days: i64,
    ) -> Result<Vec<HistoryEntry>, ApiError> {
        let rows = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT city, temperature, humidity, pressure, wind_speed, description, timestamp
            FROM weather_data
            WHERE user_id = ? AND timestamp > date('now', ?)
            ORDER BY timestamp DESC
            "#,
        )
        .bind(user_id)
        .bind(format!("-{days} days"))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Per-city search counts and averages, most-searched first, top 5.
    pub async fn stats(db: &SqlitePool, user_id: i64) -> Result<Vec<CityStats>, ApiError> {
        let rows = sqlx::query_as::<_, CityStats>(
            r#"
            SELECT
                city,
                COUNT(*) AS search_count,
                AVG(temperature) AS avg_temperature,
                AVG(humidity) AS avg_humidity,
                AVG(pressure) AS avg_pressure,
                AVG(wind_speed) AS avg_wind_speed
            FROM weather_data
            WHERE user_id = ?
            GROUP BY city
            ORDER BY search_count DESC
            LIMIT 5
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn temperature_series(
        db: &SqlitePool,
        user_id: i64,
        days: i64,
    ) -> Result<Vec<TemperaturePoint>, ApiError> {
        let rows = sqlx::query_as::<_, TemperaturePoint>(
            r#"
            SELECT city, temperature, timestamp
            FROM weather_data
            WHERE user_id = ? AND timestamp > date('now', ?)
            ORDER BY timestamp
            "#,
        )
        .bind(user_id)
        .bind(format!("-{days} days"))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
