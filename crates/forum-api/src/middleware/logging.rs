//! Request logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log method, path, status, and latency for every request.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status >= 500 {
        tracing::error!(%method, %path, status, duration_ms, "Request failed");
    } else if status >= 400 {
        tracing::warn!(%method, %path, status, duration_ms, "Request rejected");
    } else {
        tracing::info!(%method, %path, status, duration_ms, "Request completed");
    }

    response
}
