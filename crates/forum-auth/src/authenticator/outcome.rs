//! Authentication failure classification.

use thiserror::Error;

use forum_core::error::AppError;
use forum_database::LookupField;
use forum_entity::principal::PrincipalKind;

/// Why an authentication attempt failed. Exactly one per failed call.
#[derive(Debug, Clone, Error)]
pub enum AuthFailure {
    /// Identifier or secret was empty.
    #[error("{0} or secret is empty")]
    Validation(LookupField),
    /// No principal of any kind matched the identifier.
    #[error("no principal matches the {0}")]
    NotFound(LookupField),
    /// A principal matched but the secret was wrong.
    #[error("secret does not match the {kind} found by {lookup}")]
    InvalidSecret {
        kind: PrincipalKind,
        lookup: LookupField,
    },
    /// The matched principal is banned.
    #[error("{0} account is banned")]
    AccountBanned(PrincipalKind),
    /// The matched principal is deactivated.
    #[error("{0} account is inactive")]
    AccountInactive(PrincipalKind),
    /// A backing service failed: the store could not be read, a stored
    /// secret could not be interpreted, or a token could not be signed.
    #[error("principal store unavailable: {0}")]
    StoreUnavailable(#[source] AppError),
}

impl AuthFailure {
    /// Stable machine-readable code for API clients.
    ///
    /// Validation, unknown identifier, and wrong secret share one code so a
    /// client cannot probe which identifiers exist.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::NotFound(_) | Self::InvalidSecret { .. } => {
                "invalid_credentials"
            }
            Self::AccountBanned(_) => "account_banned",
            Self::AccountInactive(_) => "account_inactive",
            Self::StoreUnavailable(_) => "service_unavailable",
        }
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(lookup) | Self::NotFound(lookup) | Self::InvalidSecret { lookup, .. } => {
                match lookup {
                    LookupField::Email => "Invalid email or password.",
                    LookupField::Username => "Invalid username or password.",
                }
            }
            Self::AccountBanned(_) => "This account has been banned.",
            Self::AccountInactive(_) => "This account is inactive. Please contact an administrator.",
            Self::StoreUnavailable(_) => {
                "Authentication is temporarily unavailable. Please try again later."
            }
        }
    }

    /// Distinct internal reason, for logs only.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::InvalidSecret { .. } => "invalid_secret",
            Self::AccountBanned(_) => "account_banned",
            Self::AccountInactive(_) => "account_inactive",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }

    /// Whether the failure comes from infrastructure rather than the caller.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_share_public_surface() {
        let not_found = AuthFailure::NotFound(LookupField::Email);
        let wrong = AuthFailure::InvalidSecret {
            kind: PrincipalKind::Admin,
            lookup: LookupField::Email,
        };
        assert_eq!(not_found.public_message(), wrong.public_message());
        assert_eq!(not_found.code(), wrong.code());
        assert_ne!(not_found.reason(), wrong.reason());
        assert_eq!(wrong.public_message(), "Invalid email or password.");
    }

    #[test]
    fn test_username_form_message() {
        let failure = AuthFailure::NotFound(LookupField::Username);
        assert_eq!(failure.public_message(), "Invalid username or password.");
    }

    #[test]
    fn test_status_failures_are_distinct() {
        let banned = AuthFailure::AccountBanned(PrincipalKind::User);
        let inactive = AuthFailure::AccountInactive(PrincipalKind::User);
        assert_eq!(banned.code(), "account_banned");
        assert_eq!(inactive.code(), "account_inactive");
        assert_ne!(banned.public_message(), "Invalid email or password.");
        assert_ne!(banned.public_message(), inactive.public_message());
    }
}
