//! PostgreSQL persistence for the cookbook: pool setup, migrations, row
//! models and repositories.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Connection pool settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl DbConfig {
    /// Load pool configuration from environment variables.
    ///
    /// | Env Var                   | Default      |
    /// |---------------------------|--------------|
    /// | `DATABASE_URL`            | (required)   |
    /// | `DB_MAX_CONNECTIONS`      | `20`         |
    /// | `DB_MIN_CONNECTIONS`      | `0`          |
    /// | `DB_IDLE_TIMEOUT_MINUTES` | pool default |
    /// | `DB_MAX_LIFETIME_HOURS`   | pool default |
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let min_connections: u32 = std::env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("DB_MIN_CONNECTIONS must be a valid u32");

        let idle_timeout = std::env::var("DB_IDLE_TIMEOUT_MINUTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(|minutes| Duration::from_secs(minutes * 60));

        let max_lifetime = std::env::var("DB_MAX_LIFETIME_HOURS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(|hours| Duration::from_secs(hours * 3600));

        Self {
            database_url,
            max_connections,
            min_connections,
            idle_timeout,
            max_lifetime,
        }
    }
}

/// Create a connection pool from the given configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);

    if let Some(idle_timeout) = config.idle_timeout {
        options = options.idle_timeout(idle_timeout);
    }
    if let Some(max_lifetime) = config.max_lifetime {
        options = options.max_lifetime(max_lifetime);
    }

    options.connect(&config.database_url).await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
