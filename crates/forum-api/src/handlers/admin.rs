//! Principal administration handlers.

use axum::Json;
use axum::extract::{Path, State};

use forum_core::error::AppError;
use forum_core::types::PrincipalId;
use forum_entity::principal::{PrincipalKind, PrincipalStatus, Role};
use forum_service::RegisterRequest;

use crate::dto::request::{
    ChangeRoleRequest, ChangeStatusRequest, CreatePrincipalRequest, ResetSecretRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, PrincipalResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::{require_admin, require_staff};
use crate::state::AppState;

use super::parse_kind;

/// `GET /api/admin/principals/{kind}`
pub async fn list_principals(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<PrincipalResponse>>>, ApiError> {
    require_staff(&state, &auth)?;
    let kind = parse_kind(&kind)?;
    let records = state.admin_service.list_principals(&auth, kind).await?;
    Ok(Json(ApiResponse::ok(
        records.into_iter().map(PrincipalResponse::from).collect(),
    )))
}

/// `POST /api/admin/principals`
pub async fn create_principal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePrincipalRequest>,
) -> Result<Json<ApiResponse<PrincipalResponse>>, ApiError> {
    require_admin(&state, &auth)?;
    let kind = parse_kind(&req.kind)?;
    let record = state
        .registration_service
        .create_principal(
            &auth,
            kind,
            RegisterRequest {
                username: req.username,
                email: req.email,
                password: req.password,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(record.into())))
}

/// `GET /api/admin/principals/{kind}/{id}`
pub async fn get_principal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<PrincipalResponse>>, ApiError> {
    require_staff(&state, &auth)?;
    let kind = parse_kind(&kind)?;
    let record = state
        .admin_service
        .get_principal(&auth, kind, PrincipalId(id))
        .await?;
    Ok(Json(ApiResponse::ok(record.into())))
}

/// `DELETE /api/admin/principals/{kind}/{id}`
pub async fn delete_principal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_admin(&state, &auth)?;
    let kind = parse_kind(&kind)?;
    state
        .admin_service
        .delete_principal(&auth, kind, PrincipalId(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "{kind} {id} deleted"
    )))))
}

/// `PUT /api/admin/principals/{kind}/{id}/status`
pub async fn change_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, i64)>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<ApiResponse<PrincipalResponse>>, ApiError> {
    require_staff(&state, &auth)?;
    let kind = parse_kind(&kind)?;
    let status: PrincipalStatus = req
        .status
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown status '{}'", req.status)))?;
    let record = state
        .admin_service
        .change_status(&auth, kind, PrincipalId(id), status)
        .await?;
    Ok(Json(ApiResponse::ok(record.into())))
}

/// `PUT /api/admin/principals/{kind}/{id}/role`
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, i64)>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<PrincipalResponse>>, ApiError> {
    require_admin(&state, &auth)?;
    if parse_kind(&kind)? != PrincipalKind::User {
        return Err(AppError::validation("Only member roles can be changed").into());
    }
    let role = req
        .role
        .as_deref()
        .map(|raw| {
            raw.parse::<Role>()
                .map_err(|_| AppError::validation(format!("Unknown role '{raw}'")))
        })
        .transpose()?;
    let record = state
        .admin_service
        .change_role(&auth, PrincipalId(id), role)
        .await?;
    Ok(Json(ApiResponse::ok(record.into())))
}

/// `PUT /api/admin/principals/{kind}/{id}/secret`
pub async fn reset_secret(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((kind, id)): Path<(String, i64)>,
    Json(req): Json<ResetSecretRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_admin(&state, &auth)?;
    let kind = parse_kind(&kind)?;
    state
        .admin_service
        .reset_secret(&auth, kind, PrincipalId(id), &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Secret updated"))))
}
