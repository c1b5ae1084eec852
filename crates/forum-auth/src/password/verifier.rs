//! Pluggable secret verification.
//!
//! Stored secrets come in three shapes: legacy plaintext, bcrypt modular
//! crypt strings, and Argon2 PHC strings. Each credentialed principal kind
//! is checked by the verifier configured for it in [`VerifierRegistry`].
//!
//! A verifier also owns the format new secrets are written in, so a kind
//! pinned to a strict scheme never receives a value its verifier cannot read.

use std::fmt;
use std::sync::Arc;

use subtle::ConstantTimeEq;

use forum_core::config::{VerifierConfig, VerifierScheme};
use forum_core::error::AppError;
use forum_entity::principal::PrincipalKind;

use super::hasher::PasswordHasher;

/// Result of checking a presented secret against a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The secret matches. `needs_rehash` asks the caller to re-store the
    /// secret through [`SecretVerifier::seal`].
    Match { needs_rehash: bool },
    /// The secret does not match.
    Mismatch,
}

impl Verification {
    /// Whether the secret matched.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

/// Checks a presented secret against a stored value.
///
/// `Err` means the stored value could not be interpreted, never that the
/// secret was wrong.
pub trait SecretVerifier: Send + Sync + fmt::Debug {
    /// Compare `secret` with `stored`.
    fn verify(&self, secret: &str, stored: &str) -> Result<Verification, AppError>;

    /// Encode `secret` in the format this verifier writes.
    fn seal(&self, secret: &str) -> Result<String, AppError>;

    /// Short scheme name used in logs.
    fn scheme(&self) -> &'static str;
}

/// Legacy equality check, done in constant time.
#[derive(Debug, Clone, Default)]
pub struct PlaintextVerifier;

impl SecretVerifier for PlaintextVerifier {
    fn verify(&self, secret: &str, stored: &str) -> Result<Verification, AppError> {
        let equal: bool = secret.as_bytes().ct_eq(stored.as_bytes()).into();
        Ok(if equal {
            Verification::Match {
                needs_rehash: false,
            }
        } else {
            Verification::Mismatch
        })
    }

    fn seal(&self, secret: &str) -> Result<String, AppError> {
        Ok(secret.to_string())
    }

    fn scheme(&self) -> &'static str {
        "plaintext"
    }
}

/// Argon2 PHC verification.
#[derive(Debug, Clone, Default)]
pub struct Argon2Verifier {
    hasher: PasswordHasher,
}

impl SecretVerifier for Argon2Verifier {
    fn verify(&self, secret: &str, stored: &str) -> Result<Verification, AppError> {
        if self.hasher.verify_password(secret, stored)? {
            Ok(Verification::Match {
                needs_rehash: self.hasher.needs_rehash(stored),
            })
        } else {
            Ok(Verification::Mismatch)
        }
    }

    fn seal(&self, secret: &str) -> Result<String, AppError> {
        self.hasher.hash_password(secret)
    }

    fn scheme(&self) -> &'static str {
        "argon2"
    }
}

/// bcrypt verification for hashes written by earlier deployments.
#[derive(Debug, Clone)]
pub struct BcryptVerifier {
    cost: u32,
}

impl BcryptVerifier {
    /// Verifier that writes new hashes at `cost`.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptVerifier {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

impl SecretVerifier for BcryptVerifier {
    fn verify(&self, secret: &str, stored: &str) -> Result<Verification, AppError> {
        match bcrypt::verify(secret, stored) {
            Ok(true) => Ok(Verification::Match {
                needs_rehash: false,
            }),
            Ok(false) => Ok(Verification::Mismatch),
            Err(e) => Err(AppError::internal(format!("Invalid bcrypt hash: {e}"))),
        }
    }

    fn seal(&self, secret: &str) -> Result<String, AppError> {
        bcrypt::hash(secret, self.cost)
            .map_err(|e| AppError::internal(format!("bcrypt hashing failed: {e}")))
    }

    fn scheme(&self) -> &'static str {
        "bcrypt"
    }
}

/// Picks a verifier from the shape of the stored value and writes Argon2id.
///
/// Plaintext and bcrypt matches ask for a rehash so legacy rows migrate on
/// the next successful login.
#[derive(Debug, Clone, Default)]
pub struct SniffingVerifier {
    plaintext: PlaintextVerifier,
    argon2: Argon2Verifier,
    bcrypt: BcryptVerifier,
}

impl SniffingVerifier {
    /// Return the verifier matching the stored format.
    pub fn detect(&self, stored: &str) -> &dyn SecretVerifier {
        if stored.starts_with("$argon2") {
            &self.argon2
        } else if is_bcrypt(stored) {
            &self.bcrypt
        } else {
            &self.plaintext
        }
    }
}

impl SecretVerifier for SniffingVerifier {
    fn verify(&self, secret: &str, stored: &str) -> Result<Verification, AppError> {
        let verifier = self.detect(stored);
        match verifier.verify(secret, stored)? {
            Verification::Match { needs_rehash } => Ok(Verification::Match {
                needs_rehash: needs_rehash || verifier.scheme() != self.argon2.scheme(),
            }),
            Verification::Mismatch => Ok(Verification::Mismatch),
        }
    }

    fn seal(&self, secret: &str) -> Result<String, AppError> {
        self.argon2.seal(secret)
    }

    fn scheme(&self) -> &'static str {
        "sniff"
    }
}

fn is_bcrypt(stored: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| stored.starts_with(prefix))
}

/// Build the verifier for a configured scheme.
pub fn verifier_for(scheme: VerifierScheme) -> Arc<dyn SecretVerifier> {
    match scheme {
        VerifierScheme::Sniff => Arc::new(SniffingVerifier::default()),
        VerifierScheme::Plaintext => Arc::new(PlaintextVerifier),
        VerifierScheme::Argon2 => Arc::new(Argon2Verifier::default()),
        VerifierScheme::Bcrypt => Arc::new(BcryptVerifier::default()),
    }
}

/// Per-kind mapping from principal kind to its secret verifier.
#[derive(Debug, Clone)]
pub struct VerifierRegistry {
    admin: Arc<dyn SecretVerifier>,
    moderator: Arc<dyn SecretVerifier>,
    user: Arc<dyn SecretVerifier>,
}

impl VerifierRegistry {
    /// Build the registry from configuration.
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self {
            admin: verifier_for(config.admin),
            moderator: verifier_for(config.moderator),
            user: verifier_for(config.user),
        }
    }

    /// Replace the verifier for one kind. Guests have no verifier and are ignored.
    pub fn with(mut self, kind: PrincipalKind, verifier: Arc<dyn SecretVerifier>) -> Self {
        match kind {
            PrincipalKind::Admin => self.admin = verifier,
            PrincipalKind::Moderator => self.moderator = verifier,
            PrincipalKind::User => self.user = verifier,
            PrincipalKind::Guest => {}
        }
        self
    }

    /// The verifier for a credentialed kind. `None` for guests.
    pub fn for_kind(&self, kind: PrincipalKind) -> Option<&dyn SecretVerifier> {
        match kind {
            PrincipalKind::Admin => Some(self.admin.as_ref()),
            PrincipalKind::Moderator => Some(self.moderator.as_ref()),
            PrincipalKind::User => Some(self.user.as_ref()),
            PrincipalKind::Guest => None,
        }
    }

    /// Encode a new secret for `kind` in the format its verifier reads.
    pub fn seal(&self, kind: PrincipalKind, secret: &str) -> Result<String, AppError> {
        self.for_kind(kind)
            .ok_or_else(|| AppError::validation("Guests have no stored secret"))?
            .seal(secret)
    }
}

impl Default for VerifierRegistry {
    fn default() -> Self {
        Self::from_config(&VerifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext() {
        let v = PlaintextVerifier;
        assert_eq!(
            v.verify("123", "123").unwrap(),
            Verification::Match {
                needs_rehash: false
            }
        );
        assert_eq!(v.seal("123").unwrap(), "123");
        assert_eq!(v.verify("1234", "123").unwrap(), Verification::Mismatch);
        assert_eq!(v.verify("", "123").unwrap(), Verification::Mismatch);
    }

    #[test]
    fn test_bcrypt_matches_and_seals_bcrypt() {
        let v = BcryptVerifier::with_cost(4);
        let stored = v.seal("123").unwrap();
        assert!(stored.starts_with("$2b$04$"));
        assert_eq!(
            v.verify("123", &stored).unwrap(),
            Verification::Match {
                needs_rehash: false
            }
        );
        assert_eq!(v.verify("124", &stored).unwrap(), Verification::Mismatch);
    }

    #[test]
    fn test_sniffing_detects_scheme() {
        let sniff = SniffingVerifier::default();
        let argon = PasswordHasher::new().hash_password("abc123").unwrap();
        let bcrypt = bcrypt::hash("abc123", 4).unwrap();

        assert_eq!(sniff.detect(&argon).scheme(), "argon2");
        assert_eq!(sniff.detect(&bcrypt).scheme(), "bcrypt");
        assert_eq!(sniff.detect("abc123").scheme(), "plaintext");

        assert_eq!(
            sniff.verify("abc123", &argon).unwrap(),
            Verification::Match { needs_rehash: false }
        );
        assert_eq!(
            sniff.verify("abc123", &bcrypt).unwrap(),
            Verification::Match { needs_rehash: true }
        );
        assert_eq!(
            sniff.verify("abc123", "abc123").unwrap(),
            Verification::Match { needs_rehash: true }
        );
        assert!(!sniff.verify("abc124", &argon).unwrap().is_match());
        assert!(sniff.seal("abc123").unwrap().starts_with("$argon2id$"));
    }

    #[test]
    fn test_strict_argon2_rejects_plaintext_rows() {
        let v = Argon2Verifier::default();
        assert!(v.verify("abc123", "abc123").is_err());
    }

    #[test]
    fn test_registry_from_config() {
        let config = VerifierConfig {
            admin: VerifierScheme::Argon2,
            moderator: VerifierScheme::Sniff,
            user: VerifierScheme::Plaintext,
        };
        let registry = VerifierRegistry::from_config(&config);
        assert_eq!(registry.for_kind(PrincipalKind::Admin).unwrap().scheme(), "argon2");
        assert_eq!(registry.for_kind(PrincipalKind::Moderator).unwrap().scheme(), "sniff");
        assert_eq!(registry.for_kind(PrincipalKind::User).unwrap().scheme(), "plaintext");
        assert!(registry.for_kind(PrincipalKind::Guest).is_none());
    }

    #[test]
    fn test_registry_seals_in_each_kinds_format() {
        let config = VerifierConfig {
            admin: VerifierScheme::Plaintext,
            moderator: VerifierScheme::Sniff,
            user: VerifierScheme::Argon2,
        };
        let registry = VerifierRegistry::from_config(&config);

        let admin = registry.seal(PrincipalKind::Admin, "abc123").unwrap();
        assert_eq!(admin, "abc123");
        assert!(registry
            .for_kind(PrincipalKind::Admin)
            .unwrap()
            .verify("abc123", &admin)
            .unwrap()
            .is_match());

        for kind in [PrincipalKind::Moderator, PrincipalKind::User] {
            let sealed = registry.seal(kind, "abc123").unwrap();
            assert!(sealed.starts_with("$argon2id$"));
            assert!(registry
                .for_kind(kind)
                .unwrap()
                .verify("abc123", &sealed)
                .unwrap()
                .is_match());
        }

        assert!(registry.seal(PrincipalKind::Guest, "abc123").is_err());
    }
}
