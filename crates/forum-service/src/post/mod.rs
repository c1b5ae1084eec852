//! Post authoring.

pub mod service;

pub use service::PostService;
