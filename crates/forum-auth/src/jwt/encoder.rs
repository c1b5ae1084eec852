//! JWT token creation with configurable signing key and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use forum_core::config::AuthConfig;
use forum_core::error::AppError;

use super::claims::Claims;
use crate::authenticator::IdentityAssertion;

/// Creates signed HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish_non_exhaustive()
    }
}

/// A freshly issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The encoded token.
    pub access_token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: i64::try_from(config.token_ttl_minutes).unwrap_or(i64::MAX),
        }
    }

    /// Issue an access token for an authenticated identity.
    ///
    /// Fails instead of panicking when the configured lifetime does not fit
    /// a timestamp.
    pub fn issue(&self, assertion: &IdentityAssertion) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(self.ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Token lifetime of {} minutes is out of range",
                    self.ttl_minutes
                ))
            })?;

        let claims = Claims {
            sub: assertion.principal_id,
            kind: assertion.principal_kind,
            role: assertion.role,
            status: assertion.status,
            name: assertion.display_name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        Ok(IssuedToken {
            access_token: self.encode(&claims)?,
            expires_at,
        })
    }

    /// Sign an arbitrary claims payload.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}
