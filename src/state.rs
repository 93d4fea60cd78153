use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::auth::repo::User;
use crate::config::AppConfig;
use crate::weather::provider::{OpenMeteoProvider, WeatherProvider};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse database url")?
            .create_if_missing(true)
            .foreign_keys(true);
        let db = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .context("connect to database")?;

        let weather =
            Arc::new(OpenMeteoProvider::new(&config.upstream)?) as Arc<dyn WeatherProvider>;

        Ok(Self {
            db,
            config,
            weather,
        })
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            db,
            config,
            weather,
        }
    }

    /// One-time startup routine: create the schema and seed the demo account.
    /// Idempotent, so restarting against an existing database is safe.
    pub async fn bootstrap(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        User::ensure_demo(&self.db)
            .await
            .context("seed demo user")?;
        Ok(())
    }
}
