//! Principal resolver and authenticator.
//!
//! Given a credential pair, finds the one principal it refers to (admins
//! first, then moderators, then users), checks the secret against that row
//! only, and then applies the status gate. The authenticator never writes;
//! rehashing is left to the caller via [`IdentityAssertion::needs_rehash`].

pub mod assertion;
pub mod credentials;
pub mod outcome;
pub mod resolver;

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use forum_database::{LookupField, PrincipalStore};
use forum_entity::principal::PrincipalStatus;

use crate::password::{Verification, VerifierRegistry};

pub use assertion::IdentityAssertion;
pub use credentials::Credentials;
pub use outcome::AuthFailure;
pub use resolver::RESOLUTION_ORDER;

/// Stateless authenticator over a principal store.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn PrincipalStore>,
    verifiers: VerifierRegistry,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("verifiers", &self.verifiers)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Create an authenticator.
    pub fn new(store: Arc<dyn PrincipalStore>, verifiers: VerifierRegistry) -> Self {
        Self { store, verifiers }
    }

    /// The per-kind verifiers, also used to encode new secrets.
    pub fn verifiers(&self) -> &VerifierRegistry {
        &self.verifiers
    }

    /// Authenticate a credential pair.
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<IdentityAssertion, AuthFailure> {
        let result = self.try_authenticate(credentials).await;
        match &result {
            Ok(assertion) => info!(
                kind = %assertion.principal_kind,
                principal_id = assertion.principal_id,
                lookup = %credentials.lookup,
                "Authentication succeeded"
            ),
            Err(failure) if failure.is_infrastructure() => error!(
                reason = failure.reason(),
                lookup = %credentials.lookup,
                identifier = %credentials.identifier,
                error = %failure,
                "Authentication failed"
            ),
            Err(failure) => warn!(
                reason = failure.reason(),
                kind = failure_kind(failure),
                lookup = %credentials.lookup,
                identifier = %credentials.identifier,
                "Authentication failed"
            ),
        }
        result
    }

    async fn try_authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<IdentityAssertion, AuthFailure> {
        let lookup = credentials.lookup;
        // Usernames are matched exactly; only emails tolerate stray whitespace.
        let identifier = match lookup {
            LookupField::Email => credentials.identifier.trim(),
            LookupField::Username => credentials.identifier.as_str(),
        };
        if identifier.trim().is_empty() || credentials.secret.is_empty() {
            return Err(AuthFailure::Validation(lookup));
        }

        let record = resolver::resolve(self.store.as_ref(), lookup, identifier)
            .await
            .map_err(AuthFailure::StoreUnavailable)?
            .ok_or(AuthFailure::NotFound(lookup))?;

        let verifier = self.verifiers.for_kind(record.kind).ok_or_else(|| {
            AuthFailure::StoreUnavailable(forum_core::AppError::internal(format!(
                "No verifier configured for {}",
                record.kind
            )))
        })?;
        debug!(kind = %record.kind, scheme = verifier.scheme(), "Verifying secret");

        let needs_rehash = match verifier
            .verify(&credentials.secret, &record.secret)
            .map_err(AuthFailure::StoreUnavailable)?
        {
            Verification::Match { needs_rehash } => needs_rehash,
            Verification::Mismatch => {
                return Err(AuthFailure::InvalidSecret {
                    kind: record.kind,
                    lookup,
                });
            }
        };

        match record.status {
            PrincipalStatus::Active => Ok(IdentityAssertion::for_principal(&record, needs_rehash)),
            PrincipalStatus::Banned => Err(AuthFailure::AccountBanned(record.kind)),
            PrincipalStatus::Inactive => Err(AuthFailure::AccountInactive(record.kind)),
        }
    }
}

fn failure_kind(failure: &AuthFailure) -> &'static str {
    match failure {
        AuthFailure::InvalidSecret { kind, .. }
        | AuthFailure::AccountBanned(kind)
        | AuthFailure::AccountInactive(kind) => kind.as_str(),
        _ => "none",
    }
}
