//! Principal entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forum_core::types::PrincipalId;

use super::kind::PrincipalKind;
use super::role::Role;
use super::status::PrincipalStatus;

/// A credentialed principal row (admin, moderator, or user).
#[derive(Clone, Serialize, Deserialize)]
pub struct PrincipalRecord {
    /// Row identifier, unique within the table.
    pub id: PrincipalId,
    /// Which kind of principal this row describes.
    pub kind: PrincipalKind,
    /// Login and display name. Unique per kind, case-sensitive.
    pub username: String,
    /// Email address. Unique per kind, case-insensitive.
    pub email: String,
    /// Stored secret: a PHC/modular hash or a legacy plaintext value.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Explicit role for user rows; `None` means "implied by kind".
    pub role: Option<Role>,
    /// Account status.
    pub status: PrincipalStatus,
    /// The admin who created this row, if any.
    pub created_by: Option<PrincipalId>,
    /// When the row was created.
    pub joined_at: DateTime<Utc>,
}

impl PrincipalRecord {
    /// The role this principal acts with.
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or_else(|| self.kind.default_role())
    }

    /// Check if the principal can log in right now.
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }
}

impl fmt::Debug for PrincipalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrincipalRecord")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("secret", &"[REDACTED]")
            .field("role", &self.role)
            .field("status", &self.status)
            .field("created_by", &self.created_by)
            .field("joined_at", &self.joined_at)
            .finish()
    }
}

/// Data required to create a new principal.
#[derive(Clone, Serialize, Deserialize)]
pub struct CreatePrincipal {
    /// Kind of principal to create. Must be credentialed.
    pub kind: PrincipalKind,
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed secret.
    pub secret: String,
    /// Explicit role (user rows only).
    pub role: Option<Role>,
    /// Creating admin's ID (optional).
    pub created_by: Option<PrincipalId>,
}

impl fmt::Debug for CreatePrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatePrincipal")
            .field("kind", &self.kind)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("created_by", &self.created_by)
            .finish_non_exhaustive()
    }
}
