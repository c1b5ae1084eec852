//! Core type definitions used across the forum workspace.

pub mod id;

pub use id::*;
