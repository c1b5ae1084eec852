//! In-memory store implementations backed by `dashmap`.
//!
//! These mirror the PostgreSQL repositories, including per-kind uniqueness
//! and case-insensitive email matching, so services can be exercised
//! without a database.

pub mod guest;
pub mod post;
pub mod principal;

pub use guest::MemoryGuestStore;
pub use post::MemoryPostStore;
pub use principal::MemoryPrincipalStore;
