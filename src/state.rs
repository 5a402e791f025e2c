use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::config::AppConfig;

/// Context handed to every handler: the store handle and configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .with_context(|| format!("parse DATABASE_URL {}", config.database_url))?
            .create_if_missing(true);

        let db = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("open sqlite database")?;

        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }
}

#[cfg(test)]
impl AppState {
    /// Fresh in-memory database with the schema applied.
    pub async fn for_tests() -> Self {
        // A single long-lived connection keeps the in-memory database alive.
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("migrations apply");

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            session: crate::config::SessionConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
        });

        Self::from_parts(db, config)
    }
}
