//! PostgreSQL connection pool management.

use std::str::FromStr;
use std::time::{Duration, Instant};

use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

use forum_core::config::DatabaseConfig;
use forum_core::error::{AppError, ErrorKind};

/// Name reported to PostgreSQL in `pg_stat_activity`.
const APPLICATION_NAME: &str = "forum-server";

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool for the configured database.
    ///
    /// `connect_timeout_seconds` bounds how long any store call waits for a
    /// connection. `statement_timeout_seconds` bounds each query on the server.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = connect_options(config)?;
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            max_connections = config.max_connections,
            statement_timeout_seconds = config.statement_timeout_seconds,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
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

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ping the database over a pooled connection and return the round trip.
    pub async fn health_check(&self) -> Result<Duration, AppError> {
        let started = Instant::now();
        let mut conn = self.pool.acquire().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "No database connection available", e)
        })?;
        conn.ping().await.map_err(|e| {
            warn!(error = %e, "Database ping failed");
            AppError::with_source(ErrorKind::Database, "Database ping failed", e)
        })?;
        Ok(started.elapsed())
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Parse the configured URL into connect options carrying the pool's
/// session settings.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, AppError> {
    if config.min_connections > config.max_connections {
        return Err(AppError::configuration(format!(
            "database.min_connections ({}) exceeds database.max_connections ({})",
            config.min_connections, config.max_connections
        )));
    }

    let options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| AppError::configuration(format!("Invalid database.url: {e}")))?
        .application_name(APPLICATION_NAME);

    Ok(match config.statement_timeout_seconds {
        0 => options,
        secs => options.options([("statement_timeout", format!("{secs}s"))]),
    })
}
