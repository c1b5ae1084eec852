//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// `GET /api/health`
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (database, database_latency_ms) = match &state.database {
        None => ("in_memory", None),
        Some(pool) => match pool.health_check().await {
            Ok(latency) => ("connected", Some(latency.as_millis() as u64)),
            Err(_) => ("unreachable", None),
        },
    };

    Json(ApiResponse::ok(HealthResponse {
        status: if database == "unreachable" { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database,
        database_latency_ms,
    }))
}
