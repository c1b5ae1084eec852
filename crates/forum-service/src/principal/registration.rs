//! Registration of new principals.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use validator::ValidateEmail;

use forum_auth::password::{PasswordValidator, VerifierRegistry};
use forum_auth::rbac::{RbacEnforcer, SystemPermission};
use forum_core::error::AppError;
use forum_core::types::PrincipalId;
use forum_database::{LookupField, PrincipalStore};
use forum_entity::principal::{CreatePrincipal, PrincipalKind, PrincipalRecord};

use crate::context::RequestContext;

/// Maximum username length.
const USERNAME_MAX: usize = 50;

/// Input for creating a principal.
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial secret, in plaintext.
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Creates principal rows, encoding secrets with each kind's verifier.
#[derive(Clone)]
pub struct RegistrationService {
    principals: Arc<dyn PrincipalStore>,
    verifiers: Arc<VerifierRegistry>,
    validator: Arc<PasswordValidator>,
    rbac: Arc<RbacEnforcer>,
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService").finish_non_exhaustive()
    }
}

impl RegistrationService {
    /// Creates a new registration service.
    pub fn new(
        principals: Arc<dyn PrincipalStore>,
        verifiers: Arc<VerifierRegistry>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            principals,
            verifiers,
            validator,
            rbac,
        }
    }

    /// Self-service registration of a member.
    pub async fn register_user(&self, req: RegisterRequest) -> Result<PrincipalRecord, AppError> {
        self.insert(PrincipalKind::User, req, None).await
    }

    /// Administrative creation of any credentialed principal.
    pub async fn create_principal(
        &self,
        ctx: &RequestContext,
        kind: PrincipalKind,
        req: RegisterRequest,
    ) -> Result<PrincipalRecord, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::PrincipalCreate)?;

        let created_by =
            (ctx.principal_kind == PrincipalKind::Admin).then_some(PrincipalId(ctx.principal_id));
        let record = self.insert(kind, req, created_by).await?;

        info!(
            actor_id = ctx.principal_id,
            kind = %kind,
            principal_id = %record.id,
            "Admin created principal"
        );
        Ok(record)
    }

    /// Create a principal without an acting context. Used by the CLI bootstrap.
    pub async fn create_unchecked(
        &self,
        kind: PrincipalKind,
        req: RegisterRequest,
    ) -> Result<PrincipalRecord, AppError> {
        self.insert(kind, req, None).await
    }

    async fn insert(
        &self,
        kind: PrincipalKind,
        req: RegisterRequest,
        created_by: Option<PrincipalId>,
    ) -> Result<PrincipalRecord, AppError> {
        if !kind.is_credentialed() {
            return Err(AppError::validation(
                "Guests are admitted by name and cannot be registered",
            ));
        }

        let username = req.username.trim();
        let email = req.email.trim();
        if username.is_empty() || email.is_empty() {
            return Err(AppError::validation("Username and email are required"));
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(AppError::validation(format!(
                "Username must be at most {USERNAME_MAX} characters"
            )));
        }
        if !email.validate_email() {
            return Err(AppError::validation("Email address is not valid"));
        }
        self.validator.validate(&req.password)?;

        // Friendly early answer; the store's unique constraint has the final word.
        if self
            .principals
            .find_by_identifier(kind, LookupField::Username, username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }
        if self
            .principals
            .find_by_identifier(kind, LookupField::Email, email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email already in use"));
        }

        let secret = self.verifiers.seal(kind, &req.password)?;
        let record = self
            .principals
            .create(&CreatePrincipal {
                kind,
                username: username.to_string(),
                email: email.to_string(),
                secret,
                role: None,
                created_by,
            })
            .await?;

        info!(kind = %kind, principal_id = %record.id, "Principal registered");
        Ok(record)
    }
}
