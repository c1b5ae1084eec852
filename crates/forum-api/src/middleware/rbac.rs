//! Route-level role guards.
//!
//! Services enforce fine-grained permissions. These guards reject callers
//! that could never reach an endpoint group before any store is touched.

use forum_core::error::AppError;
use forum_entity::principal::Role;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Require at least moderator privileges.
pub fn require_staff(state: &AppState, user: &AuthUser) -> Result<(), ApiError> {
    state
        .rbac
        .require_minimum_role(&user.role, &Role::Moderator)
        .map_err(|_| ApiError(AppError::forbidden("Staff access required")))
}

/// Require admin privileges.
pub fn require_admin(state: &AppState, user: &AuthUser) -> Result<(), ApiError> {
    state
        .rbac
        .require_minimum_role(&user.role, &Role::Admin)
        .map_err(|_| ApiError(AppError::forbidden("Admin access required")))
}
