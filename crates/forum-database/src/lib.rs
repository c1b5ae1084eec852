//! # forum-database
//!
//! PostgreSQL connection management, the store traits the rest of the
//! backend programs against, and two implementations of each: sqlx
//! repositories for production and dashmap-backed stores for tests and
//! local tooling.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{GuestStore, LookupField, PostStore, PrincipalStore};
