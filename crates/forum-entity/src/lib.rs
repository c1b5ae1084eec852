//! # forum-entity
//!
//! Domain entity models for the forum backend. Every struct in this crate
//! represents a stored row or a domain value object. Enums are stored as
//! lowercase text and parsed back through `FromStr`, which also accepts the
//! legacy spellings found in older rows.

pub mod guest;
pub mod post;
pub mod principal;
