//! Login flow: authenticate, upgrade stored secrets, issue a token.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use forum_auth::jwt::{IssuedToken, JwtEncoder};
use forum_auth::{AuthFailure, Authenticator, Credentials, IdentityAssertion};
use forum_core::error::AppError;
use forum_core::types::PrincipalId;
use forum_database::{GuestStore, PrincipalStore};

/// Maximum length of a guest display name.
const GUEST_NAME_MAX: usize = 50;

/// A successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// Who logged in.
    pub identity: IdentityAssertion,
    /// The issued access token.
    pub token: IssuedToken,
}

/// Orchestrates authentication and token issuance.
#[derive(Clone)]
pub struct LoginService {
    authenticator: Arc<Authenticator>,
    principals: Arc<dyn PrincipalStore>,
    guests: Arc<dyn GuestStore>,
    encoder: Arc<JwtEncoder>,
    rehash_on_login: bool,
}

impl std::fmt::Debug for LoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginService")
            .field("rehash_on_login", &self.rehash_on_login)
            .finish_non_exhaustive()
    }
}

impl LoginService {
    /// Creates a new login service.
    pub fn new(
        authenticator: Arc<Authenticator>,
        principals: Arc<dyn PrincipalStore>,
        guests: Arc<dyn GuestStore>,
        encoder: Arc<JwtEncoder>,
        rehash_on_login: bool,
    ) -> Self {
        Self {
            authenticator,
            principals,
            guests,
            encoder,
            rehash_on_login,
        }
    }

    /// Authenticate a credential pair and issue an access token.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, AuthFailure> {
        let identity = self.authenticator.authenticate(credentials).await?;

        if self.rehash_on_login && identity.needs_rehash {
            self.upgrade_secret(&identity, &credentials.secret).await;
        }

        let token = self
            .encoder
            .issue(&identity)
            .map_err(AuthFailure::StoreUnavailable)?;

        Ok(LoginOutcome { identity, token })
    }

    /// Admit a guest by name and issue an access token. No secret is checked.
    pub async fn enter_as_guest(&self, username: &str) -> Result<LoginOutcome, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Guest name must not be empty"));
        }
        if username.chars().count() > GUEST_NAME_MAX {
            return Err(AppError::validation(format!(
                "Guest name must be at most {GUEST_NAME_MAX} characters"
            )));
        }

        let guest = self.guests.create(username).await?;
        let identity = IdentityAssertion::for_guest(&guest);
        let token = self.encoder.issue(&identity)?;

        info!(guest_id = %guest.id, "Guest admitted");
        Ok(LoginOutcome { identity, token })
    }

    /// Re-store a secret in the format the kind's verifier writes. Never fails
    /// the login.
    async fn upgrade_secret(&self, identity: &IdentityAssertion, secret: &str) {
        let kind = identity.principal_kind;
        let id = PrincipalId(identity.principal_id);

        let result = match self.authenticator.verifiers().seal(kind, secret) {
            Ok(sealed) => self.principals.update_secret(kind, id, &sealed).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => info!(kind = %kind, principal_id = %id, "Stored secret upgraded"),
            Err(e) => warn!(
                kind = %kind,
                principal_id = %id,
                error = %e,
                "Failed to upgrade stored secret"
            ),
        }
    }
}
