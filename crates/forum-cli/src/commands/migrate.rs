//! Database migration commands.

use clap::{Args, Subcommand};

use forum_core::error::AppError;
use forum_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check connectivity to the configured database
    Ping,
}

/// Execute migration commands.
pub async fn execute(args: &MigrateArgs, pool: &DatabasePool) -> Result<(), AppError> {
    match args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            forum_database::migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied.");
        }
        MigrateCommand::Ping => {
            let latency = pool.health_check().await?;
            output::print_success(&format!(
                "Database reachable ({} ms).",
                latency.as_millis()
            ));
        }
    }
    Ok(())
}
