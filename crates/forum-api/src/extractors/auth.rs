//! Bearer-token extractor producing a [`RequestContext`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use forum_core::error::AppError;
use forum_core::types::PrincipalId;
use forum_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, extracted from `Authorization: Bearer <jwt>`.
///
/// Credentialed tokens are only honoured while their row still exists and
/// may log in; the role comes from the row, not the token. Guest tokens
/// carry everything needed and are taken as issued.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Missing or invalid Authorization header"))?;

        let claims = state.jwt_decoder.decode(bearer.token())?;
        if !claims.kind.is_credentialed() {
            return Ok(AuthUser(RequestContext::from_claims(&claims)));
        }

        let record = state
            .principals
            .find_by_id_and_kind(claims.kind, PrincipalId(claims.sub))
            .await?
            .ok_or_else(|| AppError::unauthorized("Principal no longer exists"))?;
        if !record.can_login() {
            return Err(AppError::unauthorized(format!("Account is {}", record.status)).into());
        }

        Ok(AuthUser(RequestContext::from_record(&record)))
    }
}
