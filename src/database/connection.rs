//! Database connection management
//!
//! Pool sizing and connection lifetimes come from [`crate::config::DatabaseConfig`];
//! a zero idle timeout or lifetime in settings disables that limit.

use sqlx::{Pool, Postgres};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use crate::config;
use crate::utils::errors::RosterError;

pub type DatabasePool = Pool<Postgres>;

/// Pool options resolved from settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&config::Settings::default().database)
    }
}

impl From<&config::DatabaseConfig> for DatabaseConfig {
    fn from(settings: &config::DatabaseConfig) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            acquire_timeout: Duration::from_secs(settings.acquire_timeout_seconds),
            idle_timeout: optional_seconds(settings.idle_timeout_seconds),
            max_lifetime: optional_seconds(settings.max_lifetime_seconds),
        }
    }
}

fn optional_seconds(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}

/// Create the connection pool and make sure the database answers
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, RosterError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await?;

    let latency = health_check(&pool).await?;

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        latency_ms = latency.as_millis() as u64,
        "Database connection pool created"
    );
    Ok(pool)
}

/// Apply the roster schema migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), RosterError> {
    info!("Running database migrations...");

    let migrator = sqlx::migrate!("./migrations");
    migrator.run(pool).await?;

    info!(known_migrations = migrator.iter().count(), "Database migrations completed");
    Ok(())
}

/// Run a `SELECT 1` round trip and return how long it took
pub async fn health_check(pool: &DatabasePool) -> Result<Duration, RosterError> {
    let started = Instant::now();
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;

    let latency = started.elapsed();
    debug!(latency_ms = latency.as_millis() as u64, "Database health check passed");
    Ok(latency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_follows_settings_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(600)));
        assert_eq!(config.max_lifetime, Some(Duration::from_secs(1800)));
        assert!(config.url.starts_with("postgresql://"));
    }

    #[test]
    fn test_pool_limits_come_from_settings() {
        let mut settings = config::Settings::default();
        settings.database.max_connections = 3;
        settings.database.acquire_timeout_seconds = 5;
        settings.database.idle_timeout_seconds = 120;
        settings.database.max_lifetime_seconds = 0;

        let config = DatabaseConfig::from(&settings.database);
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(120)));
        assert_eq!(config.max_lifetime, None);
    }
}
