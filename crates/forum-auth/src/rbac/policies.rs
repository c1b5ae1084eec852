//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use forum_entity::principal::Role;

/// A system-level permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPermission {
    /// Create admin, moderator, or user rows.
    PrincipalCreate,
    /// Read any principal row.
    PrincipalRead,
    /// Delete principal rows.
    PrincipalDelete,
    /// Change the role column of user rows.
    PrincipalChangeRole,
    /// Reset another principal's secret.
    PrincipalResetSecret,
    /// Change the status of any principal.
    PrincipalChangeStatus,
    /// Change the status of user rows only (ban, unban, deactivate members).
    MemberChangeStatus,
    /// Read member rows.
    MemberRead,
    /// Access health/status endpoints.
    SystemHealth,
}

/// Defines the mapping from each role to its set of allowed system permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<Role, HashSet<SystemPermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use SystemPermission::*;

        let mut policies = HashMap::new();
        policies.insert(Role::Guest, HashSet::from([SystemHealth]));
        policies.insert(Role::User, HashSet::from([SystemHealth]));
        policies.insert(
            Role::Moderator,
            HashSet::from([MemberRead, MemberChangeStatus, SystemHealth]),
        );
        policies.insert(
            Role::Admin,
            HashSet::from([
                PrincipalCreate,
                PrincipalRead,
                PrincipalDelete,
                PrincipalChangeRole,
                PrincipalResetSecret,
                PrincipalChangeStatus,
                MemberChangeStatus,
                MemberRead,
                SystemHealth,
            ]),
        );

        Self { policies }
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: &Role) -> HashSet<SystemPermission> {
        self.policies.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: &Role, permission: &SystemPermission) -> bool {
        self.policies
            .get(role)
            .is_some_and(|perms| perms.contains(permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
