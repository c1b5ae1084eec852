//! Precedence resolution across principal kinds.

use forum_core::result::AppResult;
use forum_database::{LookupField, PrincipalStore};
use forum_entity::principal::{PrincipalKind, PrincipalRecord};

/// The order in which kinds are searched. The first kind with a matching
/// row owns the identifier for the rest of the attempt.
pub const RESOLUTION_ORDER: [PrincipalKind; 3] = [
    PrincipalKind::Admin,
    PrincipalKind::Moderator,
    PrincipalKind::User,
];

/// Find the single row an identifier refers to, honouring [`RESOLUTION_ORDER`].
pub async fn resolve(
    store: &dyn PrincipalStore,
    lookup: LookupField,
    identifier: &str,
) -> AppResult<Option<PrincipalRecord>> {
    for kind in RESOLUTION_ORDER {
        if let Some(record) = store.find_by_identifier(kind, lookup, identifier).await? {
            return Ok(Some(record));
        }
    }
    Ok(None)
}
