//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod principal;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use forum_core::config::AppConfig;
use forum_core::error::AppError;
use forum_database::DatabasePool;
use forum_database::repositories::PgPrincipalRepository;

use crate::output::OutputFormat;

/// Forum backend administration.
#[derive(Debug, Parser)]
#[command(name = "forum-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (`config/{env}.toml` overlays `config/default.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Bootstrap admin and moderator accounts
    Admin(admin::AdminArgs),
    /// Inspect and maintain principal rows
    Principal(principal::PrincipalArgs),
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        let pool = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &pool).await,
            Commands::Admin(args) => admin::execute(args, &config, &pool).await,
            Commands::Principal(args) => {
                principal::execute(args, &config, &pool, self.format).await
            }
        };

        pool.close().await;
        result
    }
}

/// Principal repository over the shared pool.
pub(crate) fn principal_store(pool: &DatabasePool) -> Arc<PgPrincipalRepository> {
    Arc::new(PgPrincipalRepository::new(pool.pool().clone()))
}

/// Map a dialoguer prompt failure into an application error.
pub(crate) fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {err}"))
}
