//! # forum-core
//!
//! Core crate for the forum backend. Contains the configuration schema,
//! typed integer identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other forum crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
