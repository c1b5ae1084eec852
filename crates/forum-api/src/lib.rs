//! # forum-api
//!
//! HTTP API layer for the forum backend built on Axum.
//!
//! Provides the REST endpoints, middleware (request logging, CORS,
//! compression, timeouts), the bearer-token extractor, DTOs, and the mapping
//! from domain errors and authentication failures to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, LoginError};
pub use state::AppState;
