//! The identity produced by a successful authentication.

use serde::{Deserialize, Serialize};

use forum_entity::guest::Guest;
use forum_entity::principal::{PrincipalKind, PrincipalRecord, PrincipalStatus, Role};

/// Who the caller is, as established by the authenticator or guest admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAssertion {
    /// Kind of principal that matched.
    pub principal_kind: PrincipalKind,
    /// Row id within the principal's table.
    pub principal_id: i64,
    /// Name shown to other members.
    pub display_name: String,
    /// Role the principal acts with.
    pub role: Role,
    /// Status at the time of authentication.
    pub status: PrincipalStatus,
    /// The stored secret should be replaced with a fresh Argon2id hash.
    #[serde(skip)]
    pub needs_rehash: bool,
}

impl IdentityAssertion {
    /// Build an assertion for an authenticated principal row.
    pub fn for_principal(record: &PrincipalRecord, needs_rehash: bool) -> Self {
        Self {
            principal_kind: record.kind,
            principal_id: record.id.get(),
            display_name: record.username.clone(),
            role: record.effective_role(),
            status: record.status,
            needs_rehash,
        }
    }

    /// Build an assertion for an admitted guest.
    pub fn for_guest(guest: &Guest) -> Self {
        Self {
            principal_kind: PrincipalKind::Guest,
            principal_id: guest.id.get(),
            display_name: guest.username.clone(),
            role: Role::Guest,
            status: PrincipalStatus::Active,
            needs_rehash: false,
        }
    }
}
