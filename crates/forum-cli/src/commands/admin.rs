//! Bootstrap commands for staff accounts.

use std::sync::Arc;

use clap::{Args, Subcommand};

use forum_auth::{PasswordValidator, RbacEnforcer, VerifierRegistry};
use forum_core::config::AppConfig;
use forum_core::error::AppError;
use forum_database::DatabasePool;
use forum_entity::principal::PrincipalKind;
use forum_service::{RegisterRequest, RegistrationService};

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an admin or moderator account
    Create {
        /// `admin` or `moderator`
        #[arg(short, long, default_value = "admin")]
        kind: String,
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands.
pub async fn execute(
    args: &AdminArgs,
    config: &AppConfig,
    pool: &DatabasePool,
) -> Result<(), AppError> {
    let AdminCommand::Create {
        kind,
        username,
        email,
        password,
    } = &args.command;

    let kind: PrincipalKind = kind
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown principal kind '{kind}'")))?;
    if !matches!(kind, PrincipalKind::Admin | PrincipalKind::Moderator) {
        return Err(AppError::validation(
            "Only admin and moderator accounts are bootstrapped here",
        ));
    }

    let username = match username {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt(format!("{kind} username"))
            .interact_text()
            .map_err(super::prompt_error)?,
    };
    let email = match email {
        Some(e) => e.clone(),
        None => dialoguer::Input::new()
            .with_prompt(format!("{kind} email"))
            .interact_text()
            .map_err(super::prompt_error)?,
    };
    let password = match password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt(format!("{kind} password"))
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(super::prompt_error)?,
    };

    let registration = RegistrationService::new(
        super::principal_store(pool),
        Arc::new(VerifierRegistry::from_config(&config.auth.verifiers)),
        Arc::new(PasswordValidator::new(&config.auth)),
        Arc::new(RbacEnforcer::new()),
    );

    let record = registration
        .create_unchecked(
            kind,
            RegisterRequest {
                username,
                email,
                password,
            },
        )
        .await?;

    output::print_success(&format!(
        "{kind} '{}' created (id: {})",
        record.username, record.id
    ));
    Ok(())
}
