//! Principal kind discriminant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use forum_core::AppError;

use super::role::Role;

/// The four kinds of principal that can act in the forum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    /// Site administrator.
    Admin,
    /// Content moderator.
    Moderator,
    /// Registered member.
    User,
    /// Anonymous visitor with a chosen name and no secret.
    Guest,
}

impl PrincipalKind {
    /// Kinds that are stored in the `principals` table and carry a secret.
    pub const CREDENTIALED: [PrincipalKind; 3] = [Self::Admin, Self::Moderator, Self::User];

    /// Whether this kind authenticates with a secret.
    pub fn is_credentialed(&self) -> bool {
        !matches!(self, Self::Guest)
    }

    /// The role implied by the kind when no explicit role is stored.
    pub fn default_role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Moderator => Role::Moderator,
            Self::User => Role::User,
            Self::Guest => Role::Guest,
        }
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrincipalKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "moderator" | "mod" => Ok(Self::Moderator),
            "user" | "registereduser" | "registered_user" => Ok(Self::User),
            "guest" => Ok(Self::Guest),
            _ => Err(AppError::validation(format!(
                "Invalid principal kind: '{s}'. Expected one of: admin, moderator, user, guest"
            ))),
        }
    }
}
