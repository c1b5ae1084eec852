//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use forum_entity::principal::{PrincipalKind, PrincipalRecord, PrincipalStatus, Role};
use forum_service::LoginOutcome;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true`.
    pub success: bool,
    /// Payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The authenticated identity as returned to clients.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    /// Principal kind.
    pub kind: PrincipalKind,
    /// Row id.
    pub id: i64,
    /// Display name.
    pub display_name: String,
    /// Effective role.
    pub role: Role,
    /// Account status.
    pub status: PrincipalStatus,
}

/// Login or guest admission result.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// Who was authenticated.
    pub principal: IdentityResponse,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        let identity = outcome.identity;
        Self {
            access_token: outcome.token.access_token,
            token_type: "Bearer",
            expires_at: outcome.token.expires_at,
            principal: IdentityResponse {
                kind: identity.principal_kind,
                id: identity.principal_id,
                display_name: identity.display_name,
                role: identity.role,
                status: identity.status,
            },
        }
    }
}

/// A principal row without its secret.
#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    /// Row id.
    pub id: i64,
    /// Principal kind.
    pub kind: PrincipalKind,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Effective role.
    pub role: Role,
    /// Account status.
    pub status: PrincipalStatus,
    /// Creating admin.
    pub created_by: Option<i64>,
    /// Creation time.
    pub joined_at: DateTime<Utc>,
}

impl From<PrincipalRecord> for PrincipalResponse {
    fn from(record: PrincipalRecord) -> Self {
        Self {
            role: record.effective_role(),
            id: record.id.get(),
            kind: record.kind,
            username: record.username,
            email: record.email,
            status: record.status,
            created_by: record.created_by.map(|id| id.get()),
            joined_at: record.joined_at,
        }
    }
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Seconds since start.
    pub uptime_seconds: u64,
    /// `connected`, `unreachable`, or `in_memory`.
    pub database: &'static str,
    /// Ping round trip when the database is connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_latency_ms: Option<u64>,
}
