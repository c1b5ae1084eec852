//! Request handlers grouped by resource.

pub mod admin;
pub mod auth;
pub mod health;
pub mod post;

use forum_core::error::AppError;
use forum_entity::principal::PrincipalKind;

use crate::error::ApiError;

/// Parse a `{kind}` path segment.
pub(crate) fn parse_kind(raw: &str) -> Result<PrincipalKind, ApiError> {
    raw.parse::<PrincipalKind>()
        .map_err(|_| ApiError(AppError::validation(format!("Unknown principal kind '{raw}'"))))
}
