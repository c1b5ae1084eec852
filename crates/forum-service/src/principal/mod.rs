//! Principal registration and administration.

pub mod admin;
pub mod registration;

pub use admin::AdminPrincipalService;
pub use registration::{RegisterRequest, RegistrationService};
