//! Forum server entry point.
//!
//! Loads configuration, connects to PostgreSQL, runs migrations, wires the
//! stores into the API state, and serves until a shutdown signal arrives.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use forum_api::AppState;
use forum_core::config::AppConfig;
use forum_core::error::AppError;
use forum_database::DatabasePool;
use forum_database::repositories::{PgGuestRepository, PgPostRepository, PgPrincipalRepository};

#[tokio::main]
async fn main() {
    let env = std::env::var("FORUM_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` overrides `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting forum server v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = DatabasePool::connect(&config.database).await?;
    forum_database::migration::run_migrations(db_pool.pool()).await?;

    let principals = Arc::new(PgPrincipalRepository::new(db_pool.pool().clone()));
    let guests = Arc::new(PgGuestRepository::new(db_pool.pool().clone()));
    let posts = Arc::new(PgPostRepository::new(db_pool.pool().clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(Arc::new(config), principals, guests, posts)
        .with_database(db_pool.clone());
    let app = forum_api::build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server failed: {e}")))?;

    tracing::info!("Shutting down");
    db_pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
