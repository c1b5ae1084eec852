//! Authentication configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Signing key shipped in `config/default.toml`. Never accepted at startup.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Shortest accepted HS256 signing key, in bytes.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Longest accepted access token lifetime (7 days).
pub const MAX_TOKEN_TTL_MINUTES: u64 = 7 * 24 * 60;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). At least
    /// [`MIN_JWT_SECRET_BYTES`] long and never the shipped placeholder.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes, at most [`MAX_TOKEN_TTL_MINUTES`].
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn score (0-4). Zero disables the strength check.
    #[serde(default)]
    pub password_min_score: u8,
    /// Re-store legacy or outdated secrets in the kind's write format after a
    /// successful login.
    #[serde(default = "default_true")]
    pub rehash_on_login: bool,
    /// Secret verification scheme per principal kind.
    #[serde(default)]
    pub verifiers: VerifierConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl(),
            password_min_length: default_password_min(),
            password_min_score: 0,
            rehash_on_login: true,
            verifiers: VerifierConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Reject signing keys and token lifetimes that are unsafe or unusable.
    pub fn validate(&self) -> Result<(), AppError> {
        let secret = self.jwt_secret.trim();
        if secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if secret == PLACEHOLDER_JWT_SECRET {
            return Err(AppError::configuration(
                "auth.jwt_secret is still the shipped placeholder; set FORUM__AUTH__JWT_SECRET",
            ));
        }
        if self.jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_BYTES} bytes"
            )));
        }
        if self.token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_minutes must be greater than zero",
            ));
        }
        if self.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_minutes must be at most {MAX_TOKEN_TTL_MINUTES}"
            )));
        }
        Ok(())
    }
}

/// Which secret verifier each credentialed principal kind uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifierConfig {
    #[serde(default)]
    pub admin: VerifierScheme,
    #[serde(default)]
    pub moderator: VerifierScheme,
    #[serde(default)]
    pub user: VerifierScheme,
}

/// A stored-secret verification scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifierScheme {
    /// Detect the scheme from the stored value.
    #[default]
    Sniff,
    /// Legacy plaintext equality.
    Plaintext,
    /// Argon2 PHC strings.
    Argon2,
    /// bcrypt modular crypt strings.
    Bcrypt,
}

impl VerifierScheme {
    /// Return the scheme as its configuration string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sniff => "sniff",
            Self::Plaintext => "plaintext",
            Self::Argon2 => "argon2",
            Self::Bcrypt => "bcrypt",
        }
    }
}

impl fmt::Display for VerifierScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerifierScheme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sniff" => Ok(Self::Sniff),
            "plaintext" => Ok(Self::Plaintext),
            "argon2" => Ok(Self::Argon2),
            "bcrypt" => Ok(Self::Bcrypt),
            _ => Err(AppError::validation(format!(
                "Invalid verifier scheme: '{s}'"
            ))),
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    120
}

fn default_password_min() -> usize {
    6
}

fn default_true() -> bool {
    true
}
