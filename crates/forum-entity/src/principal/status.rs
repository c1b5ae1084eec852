//! Principal account status and its administrative state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use forum_core::AppError;

/// Account status for a credentialed principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalStatus {
    /// Account is active and can log in.
    Active,
    /// Account is deactivated by an admin.
    Inactive,
    /// Account is banned by an admin or moderator.
    Banned,
}

impl PrincipalStatus {
    /// Check if a principal with this status may authenticate.
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Validate an administrative status change.
    ///
    /// Allowed: active to inactive or banned, and inactive or banned back to
    /// active. Everything else, no-ops included, is rejected.
    pub fn transition_to(self, target: PrincipalStatus) -> Result<PrincipalStatus, AppError> {
        use PrincipalStatus::*;
        match (self, target) {
            (Active, Inactive) | (Active, Banned) | (Inactive, Active) | (Banned, Active) => {
                Ok(target)
            }
            (from, to) => Err(AppError::validation(format!(
                "Cannot change status from '{from}' to '{to}'"
            ))),
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Banned => "banned",
        }
    }
}

impl fmt::Display for PrincipalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrincipalStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "ban" | "banned" => Ok(Self::Banned),
            _ => Err(AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: active, inactive, banned"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PrincipalStatus::*;

    #[test]
    fn test_legacy_values_parse() {
        assert_eq!("Active".parse::<PrincipalStatus>().unwrap(), Active);
        assert_eq!("Inactive".parse::<PrincipalStatus>().unwrap(), Inactive);
        assert_eq!("Ban".parse::<PrincipalStatus>().unwrap(), Banned);
        assert_eq!("BANNED".parse::<PrincipalStatus>().unwrap(), Banned);
        assert!("locked".parse::<PrincipalStatus>().is_err());
    }

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(Active.transition_to(Inactive).unwrap(), Inactive);
        assert_eq!(Active.transition_to(Banned).unwrap(), Banned);
        assert_eq!(Inactive.transition_to(Active).unwrap(), Active);
        assert_eq!(Banned.transition_to(Active).unwrap(), Active);
    }

    #[test]
    fn test_rejected_transitions() {
        for (from, to) in [
            (Active, Active),
            (Inactive, Inactive),
            (Banned, Banned),
            (Inactive, Banned),
            (Banned, Inactive),
        ] {
            assert!(from.transition_to(to).is_err(), "{from} -> {to} should fail");
        }
    }

    #[test]
    fn test_only_active_can_login() {
        assert!(Active.can_login());
        assert!(!Inactive.can_login());
        assert!(!Banned.can_login());
    }
}
