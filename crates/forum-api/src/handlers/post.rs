//! Post handlers.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use forum_core::error::AppError;
use forum_core::types::PostId;
use forum_entity::post::Post;

use crate::dto::request::CreatePostRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /api/posts`
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let post = state
        .post_service
        .create_post(&auth, req.thread_id, &req.content)
        .await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// `GET /api/posts/{id}`
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state.post_service.get_post(PostId(id)).await?;
    Ok(Json(ApiResponse::ok(post)))
}
