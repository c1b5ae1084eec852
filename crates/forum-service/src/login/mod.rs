//! Login and guest admission.

pub mod service;

pub use service::{LoginOutcome, LoginService};
