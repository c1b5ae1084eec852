//! Store traits.
//!
//! Services and the authenticator depend on these traits only, so the same
//! code runs against PostgreSQL in production and against the in-memory
//! stores in tests.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use forum_core::result::AppResult;
use forum_core::types::{GuestId, PostId, PrincipalId};
use forum_entity::guest::Guest;
use forum_entity::post::{CreatePost, Post};
use forum_entity::principal::{
    CreatePrincipal, PrincipalKind, PrincipalRecord, PrincipalStatus, Role,
};

/// Which identifying column a login form matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupField {
    /// Case-insensitive email match.
    Email,
    /// Exact username match.
    Username,
}

impl LookupField {
    /// Return the field as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
        }
    }
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence for admin, moderator, and user rows.
///
/// Every lookup is scoped to a single kind. Uniqueness of username and email
/// holds within a kind only.
#[async_trait]
pub trait PrincipalStore: Send + Sync + 'static {
    /// Find the row of `kind` whose `field` matches `value`.
    async fn find_by_identifier(
        &self,
        kind: PrincipalKind,
        field: LookupField,
        value: &str,
    ) -> AppResult<Option<PrincipalRecord>>;

    /// Find a row by id, scoped to a kind.
    async fn find_by_id_and_kind(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
    ) -> AppResult<Option<PrincipalRecord>>;

    /// Insert a row. Returns `Conflict` when the username or email is taken.
    async fn create(&self, data: &CreatePrincipal) -> AppResult<PrincipalRecord>;

    /// Overwrite the status of a row.
    async fn update_status(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
        status: PrincipalStatus,
    ) -> AppResult<PrincipalRecord>;

    /// Overwrite the explicit role of a user row.
    async fn update_role(&self, id: PrincipalId, role: Option<Role>) -> AppResult<PrincipalRecord>;

    /// Replace the stored secret.
    async fn update_secret(&self, kind: PrincipalKind, id: PrincipalId, secret: &str)
    -> AppResult<()>;

    /// Physically delete a row. Returns `true` if a row was removed.
    async fn delete(&self, kind: PrincipalKind, id: PrincipalId) -> AppResult<bool>;

    /// List every row of a kind, oldest first.
    async fn list_by_kind(&self, kind: PrincipalKind) -> AppResult<Vec<PrincipalRecord>>;
}

/// Persistence for guests.
#[async_trait]
pub trait GuestStore: Send + Sync + 'static {
    /// Insert a guest with the given name.
    async fn create(&self, username: &str) -> AppResult<Guest>;

    /// Find a guest by id.
    async fn find_by_id(&self, id: GuestId) -> AppResult<Option<Guest>>;
}

/// Persistence for posts.
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    /// Insert a post.
    async fn create(&self, data: &CreatePost) -> AppResult<Post>;

    /// Find a post by id.
    async fn find_by_id(&self, id: PostId) -> AppResult<Option<Post>>;
}
