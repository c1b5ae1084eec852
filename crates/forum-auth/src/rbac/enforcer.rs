//! RBAC enforcement: checks whether a role holds a required permission.

use forum_core::error::AppError;
use forum_entity::principal::Role;

use super::policies::{RbacPolicies, SystemPermission};

/// Enforces role-based access control for administrative operations.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Returns `Err(AppError::Forbidden)` unless `role` holds `permission`.
    pub fn require_permission(
        &self,
        role: &Role,
        permission: &SystemPermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role has the required permission.
    pub fn has_permission(&self, role: &Role, permission: &SystemPermission) -> bool {
        self.policies.has_permission(role, permission)
    }

    /// Returns `Err(AppError::Forbidden)` unless `actual` is at least `minimum`.
    pub fn require_minimum_role(&self, actual: &Role, minimum: &Role) -> Result<(), AppError> {
        if actual.has_at_least(minimum) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{actual}' is insufficient; minimum required: '{minimum}'"
            )))
        }
    }
}
