//! # forum-service
//!
//! Business logic service layer for the forum backend. Each service
//! orchestrates stores, the authenticator, and token issuance to implement
//! an application-level use case.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod context;
pub mod login;
pub mod post;
pub mod principal;

pub use context::RequestContext;
pub use login::{LoginOutcome, LoginService};
pub use post::PostService;
pub use principal::{AdminPrincipalService, RegisterRequest, RegistrationService};
