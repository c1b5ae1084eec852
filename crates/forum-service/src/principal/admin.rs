//! Administrative principal management: status, role, secret resets, deletion.

use std::sync::Arc;

use tracing::info;

use forum_auth::password::{PasswordValidator, VerifierRegistry};
use forum_auth::rbac::{RbacEnforcer, SystemPermission};
use forum_core::error::AppError;
use forum_core::types::PrincipalId;
use forum_database::PrincipalStore;
use forum_entity::principal::{PrincipalKind, PrincipalRecord, PrincipalStatus, Role};

use crate::context::RequestContext;

/// Handles administrative operations on principal rows.
#[derive(Clone)]
pub struct AdminPrincipalService {
    principals: Arc<dyn PrincipalStore>,
    verifiers: Arc<VerifierRegistry>,
    validator: Arc<PasswordValidator>,
    rbac: Arc<RbacEnforcer>,
}

impl std::fmt::Debug for AdminPrincipalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminPrincipalService").finish_non_exhaustive()
    }
}

impl AdminPrincipalService {
    /// Creates a new admin principal service.
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

    /// Lists every row of a kind.
    pub async fn list_principals(
        &self,
        ctx: &RequestContext,
        kind: PrincipalKind,
    ) -> Result<Vec<PrincipalRecord>, AppError> {
        require_credentialed(kind)?;
        self.require_read(ctx, kind)?;
        self.principals.list_by_kind(kind).await
    }

    /// Gets a single row.
    pub async fn get_principal(
        &self,
        ctx: &RequestContext,
        kind: PrincipalKind,
        id: PrincipalId,
    ) -> Result<PrincipalRecord, AppError> {
        require_credentialed(kind)?;
        self.require_read(ctx, kind)?;
        self.load(kind, id).await
    }

    /// Applies a status transition. Moderators may only act on member rows.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        kind: PrincipalKind,
        id: PrincipalId,
        status: PrincipalStatus,
    ) -> Result<PrincipalRecord, AppError> {
        require_credentialed(kind)?;
        let any = self
            .rbac
            .has_permission(&ctx.role, &SystemPermission::PrincipalChangeStatus);
        let members = kind == PrincipalKind::User
            && self
                .rbac
                .has_permission(&ctx.role, &SystemPermission::MemberChangeStatus);
        if !any && !members {
            return Err(AppError::forbidden(format!(
                "Role '{}' cannot change the status of {kind} accounts",
                ctx.role
            )));
        }
        if ctx.is_self(kind, id.get()) {
            return Err(AppError::forbidden("Cannot change your own status"));
        }

        let current = self.load(kind, id).await?;
        let next = current.status.transition_to(status)?;
        let updated = self.principals.update_status(kind, id, next).await?;

        info!(
            actor_kind = %ctx.principal_kind,
            actor_id = ctx.principal_id,
            kind = %kind,
            principal_id = %id,
            from = %current.status,
            to = %next,
            "Principal status changed"
        );
        Ok(updated)
    }

    /// Sets or clears the explicit role of a member row.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        id: PrincipalId,
        role: Option<Role>,
    ) -> Result<PrincipalRecord, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::PrincipalChangeRole)?;
        if role == Some(Role::Guest) {
            return Err(AppError::validation("Members cannot be given the guest role"));
        }

        let updated = self.principals.update_role(id, role).await?;

        info!(
            actor_id = ctx.principal_id,
            principal_id = %id,
            role = %updated.effective_role(),
            "Member role changed"
        );
        Ok(updated)
    }

    /// Replaces a principal's secret, encoded for the kind's verifier.
    pub async fn reset_secret(
        &self,
        ctx: &RequestContext,
        kind: PrincipalKind,
        id: PrincipalId,
        password: &str,
    ) -> Result<(), AppError> {
        require_credentialed(kind)?;
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::PrincipalResetSecret)?;
        self.validator.validate(password)?;

        let sealed = self.verifiers.seal(kind, password)?;
        self.principals.update_secret(kind, id, &sealed).await?;

        info!(
            actor_id = ctx.principal_id,
            kind = %kind,
            principal_id = %id,
            "Secret reset by admin"
        );
        Ok(())
    }

    /// Physically deletes a principal row.
    pub async fn delete_principal(
        &self,
        ctx: &RequestContext,
        kind: PrincipalKind,
        id: PrincipalId,
    ) -> Result<(), AppError> {
        require_credentialed(kind)?;
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::PrincipalDelete)?;
        if ctx.is_self(kind, id.get()) {
            return Err(AppError::forbidden("Cannot delete your own account"));
        }

        if !self.principals.delete(kind, id).await? {
            return Err(AppError::not_found(format!("{kind} {id} not found")));
        }

        info!(
            actor_id = ctx.principal_id,
            kind = %kind,
            principal_id = %id,
            "Principal deleted"
        );
        Ok(())
    }

    fn require_read(&self, ctx: &RequestContext, kind: PrincipalKind) -> Result<(), AppError> {
        if self
            .rbac
            .has_permission(&ctx.role, &SystemPermission::PrincipalRead)
        {
            return Ok(());
        }
        if kind == PrincipalKind::User {
            return self
                .rbac
                .require_permission(&ctx.role, &SystemPermission::MemberRead);
        }
        Err(AppError::forbidden(format!(
            "Role '{}' cannot read {kind} accounts",
            ctx.role
        )))
    }

    async fn load(&self, kind: PrincipalKind, id: PrincipalId) -> Result<PrincipalRecord, AppError> {
        self.principals
            .find_by_id_and_kind(kind, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{kind} {id} not found")))
    }
}

fn require_credentialed(kind: PrincipalKind) -> Result<(), AppError> {
    if kind.is_credentialed() {
        Ok(())
    } else {
        Err(AppError::validation("Guests are not managed as principals"))
    }
}
