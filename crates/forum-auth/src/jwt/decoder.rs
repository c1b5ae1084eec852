//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use forum_core::config::AuthConfig;
use forum_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use forum_core::error::ErrorKind;
    use forum_entity::principal::{PrincipalKind, PrincipalStatus, Role};

    use super::*;
    use crate::authenticator::IdentityAssertion;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn assertion() -> IdentityAssertion {
        IdentityAssertion {
            principal_kind: PrincipalKind::Moderator,
            principal_id: 7,
            display_name: "mod".to_string(),
            role: Role::Moderator,
            status: PrincipalStatus::Active,
            needs_rehash: false,
        }
    }

    #[test]
    fn test_round_trip() {
        let cfg = config("test-secret");
        let issued = JwtEncoder::new(&cfg).issue(&assertion()).unwrap();
        let claims = JwtDecoder::new(&cfg).decode(&issued.access_token).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.kind, PrincipalKind::Moderator);
        assert_eq!(claims.role, Role::Moderator);
        assert_eq!(claims.status, PrincipalStatus::Active);
        assert_eq!(claims.exp - claims.iat, 120 * 60);
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let issued = JwtEncoder::new(&config("one")).issue(&assertion()).unwrap();
        let err = JwtDecoder::new(&config("two"))
            .decode(&issued.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_expired_rejected() {
        let cfg = config("test-secret");
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            kind: PrincipalKind::User,
            role: Role::User,
            status: PrincipalStatus::Active,
            name: "bob".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4(),
        };
        let token = JwtEncoder::new(&cfg).encode(&claims).unwrap();
        let err = JwtDecoder::new(&cfg).decode(&token).unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("s")).decode("not.a.token").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
