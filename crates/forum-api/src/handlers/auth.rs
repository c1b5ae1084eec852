//! Authentication handlers: login, guest admission, registration, `me`.

use axum::Json;
use axum::extract::State;

use forum_auth::Credentials;
use forum_core::error::AppError;
use forum_core::types::PrincipalId;
use forum_entity::principal::{PrincipalKind, PrincipalStatus};
use forum_service::RegisterRequest;

use crate::dto::request::{GuestRequest, LoginRequest, UsernameLoginRequest};
use crate::dto::response::{ApiResponse, IdentityResponse, LoginResponse, PrincipalResponse};
use crate::error::{ApiError, LoginError};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, LoginError> {
    let credentials = Credentials::by_email(req.email, req.password);
    let outcome = state.login_service.login(&credentials).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}

/// `POST /api/auth/login/username`
pub async fn login_username(
    State(state): State<AppState>,
    Json(req): Json<UsernameLoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, LoginError> {
    let credentials = Credentials::by_username(req.username, req.password);
    let outcome = state.login_service.login(&credentials).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}

/// `POST /api/auth/guest`
pub async fn guest(
    State(state): State<AppState>,
    Json(req): Json<GuestRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let outcome = state.login_service.enter_as_guest(&req.username).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<PrincipalResponse>>, ApiError> {
    let record = state.registration_service.register_user(req).await?;
    Ok(Json(ApiResponse::ok(record.into())))
}

/// `GET /api/auth/me`
///
/// Credentialed callers are re-read from the store so a ban or deletion
/// after token issue is visible.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<IdentityResponse>>, ApiError> {
    if auth.principal_kind == PrincipalKind::Guest {
        return Ok(Json(ApiResponse::ok(IdentityResponse {
            kind: PrincipalKind::Guest,
            id: auth.principal_id,
            display_name: auth.display_name.clone(),
            role: auth.role,
            status: PrincipalStatus::Active,
        })));
    }

    let record = state
        .principals
        .find_by_id_and_kind(auth.principal_kind, PrincipalId(auth.principal_id))
        .await?
        .ok_or_else(|| AppError::unauthorized("Principal no longer exists"))?;

    Ok(Json(ApiResponse::ok(IdentityResponse {
        kind: record.kind,
        id: record.id.get(),
        role: record.effective_role(),
        status: record.status,
        display_name: record.username,
    })))
}
