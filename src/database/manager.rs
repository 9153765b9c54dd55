use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, DatabaseConfig};

/// Errors from the relational store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Pool construction and store-level maintenance.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Build the pool without connecting. The first query opens the first
    /// connection, so an unreachable database fails requests, not startup.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config.url()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(url)?;

        info!(
            "Configured database pool (max {} connections)",
            config.max_connections
        );
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>) -> DatabaseConfig {
        DatabaseConfig {
            url: url.map(str::to_string),
            max_connections: 2,
            connection_timeout: 1,
        }
    }

    #[test]
    fn missing_url_is_a_config_error() {
        let err = DatabaseManager::connect_lazy(&config(None)).unwrap_err();
        assert!(matches!(err, DatabaseError::Config(ConfigError::Missing("DATABASE_URL"))));
    }

    #[tokio::test]
    async fn malformed_url_is_rejected() {
        let err = DatabaseManager::connect_lazy(&config(Some("not a url"))).unwrap_err();
        assert!(matches!(err, DatabaseError::Sqlx(_)));
    }

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        // Nothing listens on port 1; building the pool must still succeed.
        let pool = DatabaseManager::connect_lazy(&config(Some("postgres://dentit@127.0.0.1:1/dentit")))
            .unwrap();
        assert_eq!(pool.size(), 0);
    }
}
