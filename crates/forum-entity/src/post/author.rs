//! Post author discriminant.

use serde::{Deserialize, Serialize};

use forum_core::AppError;
use forum_core::types::PrincipalId;

use crate::principal::PrincipalKind;

/// The single author of a post: a member or a moderator, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PostAuthor {
    /// Written by a registered user.
    User(PrincipalId),
    /// Written by a moderator.
    Moderator(PrincipalId),
}

impl PostAuthor {
    /// Build an author from an acting principal, if that kind may author posts.
    pub fn from_principal(kind: PrincipalKind, id: PrincipalId) -> Option<Self> {
        match kind {
            PrincipalKind::User => Some(Self::User(id)),
            PrincipalKind::Moderator => Some(Self::Moderator(id)),
            PrincipalKind::Admin | PrincipalKind::Guest => None,
        }
    }

    /// Rebuild an author from its stored `author_kind`/`author_id` pair.
    pub fn from_parts(kind: &str, id: i64) -> Result<Self, AppError> {
        let kind: PrincipalKind = kind.parse()?;
        Self::from_principal(kind, PrincipalId(id)).ok_or_else(|| {
            AppError::validation(format!("'{kind}' cannot be a post author"))
        })
    }

    /// The principal kind of the author.
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Self::User(_) => PrincipalKind::User,
            Self::Moderator(_) => PrincipalKind::Moderator,
        }
    }

    /// The principal id of the author.
    pub fn id(&self) -> PrincipalId {
        match self {
            Self::User(id) | Self::Moderator(id) => *id,
        }
    }
}
