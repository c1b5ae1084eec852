//! Principal maintenance commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use forum_auth::{PasswordValidator, VerifierRegistry};
use forum_core::config::AppConfig;
use forum_core::error::AppError;
use forum_database::{DatabasePool, LookupField, PrincipalStore};
use forum_entity::principal::{PrincipalKind, PrincipalRecord, PrincipalStatus};

use crate::output::{self, OutputFormat};

/// Arguments for principal commands
#[derive(Debug, Args)]
pub struct PrincipalArgs {
    /// Principal subcommand
    #[command(subcommand)]
    pub command: PrincipalCommand,
}

/// Principal subcommands
#[derive(Debug, Subcommand)]
pub enum PrincipalCommand {
    /// List every principal of a kind
    List {
        /// `admin`, `moderator`, or `user`
        kind: String,
    },
    /// Change the status of a principal
    SetStatus {
        /// `admin`, `moderator`, or `user`
        kind: String,
        /// Username
        username: String,
        /// `active`, `inactive`, or `banned`
        status: String,
    },
    /// Replace a principal's secret, encoded for the kind's verifier
    ResetSecret {
        /// `admin`, `moderator`, or `user`
        kind: String,
        /// Username
        username: String,
        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Principal display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PrincipalRow {
    id: i64,
    username: String,
    email: String,
    role: String,
    status: String,
    joined_at: String,
}

impl From<&PrincipalRecord> for PrincipalRow {
    fn from(p: &PrincipalRecord) -> Self {
        Self {
            id: p.id.get(),
            username: p.username.clone(),
            email: p.email.clone(),
            role: p.effective_role().to_string(),
            status: p.status.to_string(),
            joined_at: p.joined_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn parse_kind(raw: &str) -> Result<PrincipalKind, AppError> {
    raw.parse::<PrincipalKind>()
        .ok()
        .filter(|k| k.is_credentialed())
        .ok_or_else(|| AppError::validation(format!("'{raw}' is not a credentialed kind")))
}

async fn find(
    store: &dyn PrincipalStore,
    kind: PrincipalKind,
    username: &str,
) -> Result<PrincipalRecord, AppError> {
    store
        .find_by_identifier(kind, LookupField::Username, username)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{kind} '{username}' not found")))
}

/// Execute principal commands.
pub async fn execute(
    args: &PrincipalArgs,
    config: &AppConfig,
    pool: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::principal_store(pool);

    match &args.command {
        PrincipalCommand::List { kind } => {
            let rows: Vec<PrincipalRow> = store
                .list_by_kind(parse_kind(kind)?)
                .await?
                .iter()
                .map(PrincipalRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        PrincipalCommand::SetStatus {
            kind,
            username,
            status,
        } => {
            let kind = parse_kind(kind)?;
            let target: PrincipalStatus = status
                .parse()
                .map_err(|_| AppError::validation(format!("Unknown status '{status}'")))?;
            let record = find(store.as_ref(), kind, username).await?;
            let next = record.status.transition_to(target)?;
            store.update_status(kind, record.id, next).await?;
            output::print_success(&format!(
                "{kind} '{username}' is now {next} (was {})",
                record.status
            ));
        }
        PrincipalCommand::ResetSecret {
            kind,
            username,
            password,
        } => {
            let kind = parse_kind(kind)?;
            let record = find(store.as_ref(), kind, username).await?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("New password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(super::prompt_error)?,
            };

            PasswordValidator::new(&config.auth).validate(&password)?;
            let sealed =
                VerifierRegistry::from_config(&config.auth.verifiers).seal(kind, &password)?;
            store.update_secret(kind, record.id, &sealed).await?;
            output::print_success(&format!("Secret reset for {kind} '{username}'"));
        }
    }
    Ok(())
}
