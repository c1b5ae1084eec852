//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forum_auth::jwt::Claims;
use forum_entity::principal::{PrincipalKind, PrincipalRecord, Role};

/// Context for the current authenticated request.
///
/// Built from verified token claims, refreshed from the stored row for
/// credentialed kinds, and passed into service methods so every operation
/// knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Kind of the acting principal.
    pub principal_kind: PrincipalKind,
    /// Row id of the acting principal.
    pub principal_id: i64,
    /// Role the principal currently acts with.
    pub role: Role,
    /// Display name.
    pub display_name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        principal_kind: PrincipalKind,
        principal_id: i64,
        role: Role,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            principal_kind,
            principal_id,
            role,
            display_name: display_name.into(),
            request_time: Utc::now(),
        }
    }

    /// Creates a context from verified token claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.kind, claims.sub, claims.role, claims.name.clone())
    }

    /// Context for a stored principal row, using its current role.
    pub fn from_record(record: &PrincipalRecord) -> Self {
        Self::new(
            record.kind,
            record.id.get(),
            record.effective_role(),
            record.username.clone(),
        )
    }

    /// Whether the context refers to the given row.
    pub fn is_self(&self, kind: PrincipalKind, id: i64) -> bool {
        self.principal_kind == kind && self.principal_id == id
    }
}
