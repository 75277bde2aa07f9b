//! PostgreSQL pool for the `postgres` provider.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

use noticeflow_core::config::database::DatabaseConfig;
use noticeflow_core::error::{AppError, ErrorKind};
use noticeflow_core::result::AppResult;

/// Name reported to PostgreSQL in `pg_stat_activity`.
const APPLICATION_NAME: &str = "noticeflow";

/// Shared sqlx pool used by every repository.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config`.
    ///
    /// The URL is parsed up front so a malformed value fails as a
    /// configuration error instead of a connection error.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "database.url is not a valid PostgreSQL URL",
                    e,
                )
            })?
            .application_name(APPLICATION_NAME);

        // Logged from the parsed options so the password never reaches the log.
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or("-"),
            user = options.get_username(),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        info!("PostgreSQL pool ready");
        Ok(Self { pool })
    }

    /// The sqlx pool handed to repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `true` when a round trip to the server succeeds.
    pub async fn health_check(&self) -> AppResult<bool> {
        if self.pool.is_closed() {
            return Ok(false);
        }
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(error = %e, "PostgreSQL health check failed");
                Ok(false)
            }
        }
    }

    /// Wait for checked-out connections to return, then close them.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noticeflow_core::config::database::DatabaseProvider;

    #[tokio::test]
    async fn test_malformed_url_is_configuration_error() {
        let config = DatabaseConfig {
            provider: DatabaseProvider::Postgres,
            url: "mysql//nope".to_string(),
            ..DatabaseConfig::default()
        };
        let err = DatabasePool::connect(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
