//! Route definitions.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the `/api` router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(post_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/login/username", post(handlers::auth::login_username))
        .route("/auth/guest", post(handlers::auth::guest))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/me", get(handlers::auth::me))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/principals", post(handlers::admin::create_principal))
        .route("/admin/principals/{kind}", get(handlers::admin::list_principals))
        .route(
            "/admin/principals/{kind}/{id}",
            get(handlers::admin::get_principal).delete(handlers::admin::delete_principal),
        )
        .route(
            "/admin/principals/{kind}/{id}/status",
            put(handlers::admin::change_status),
        )
        .route(
            "/admin/principals/{kind}/{id}/role",
            put(handlers::admin::change_role),
        )
        .route(
            "/admin/principals/{kind}/{id}/secret",
            put(handlers::admin::reset_secret),
        )
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(handlers::post::create_post))
        .route("/posts/{id}", get(handlers::post::get_post))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
