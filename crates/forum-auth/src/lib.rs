//! # forum-auth
//!
//! Authentication and authorization for the forum backend.
//!
//! ## Modules
//!
//! - `authenticator`: resolves a credential pair to exactly one principal
//!   and verifies its secret and status
//! - `password`: secret verifiers, Argon2id hashing, and password policy
//! - `jwt`: access token creation and validation
//! - `rbac`: role-based access control enforcement

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use authenticator::{AuthFailure, Authenticator, Credentials, IdentityAssertion};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator, SecretVerifier, VerifierRegistry};
pub use rbac::{RbacEnforcer, RbacPolicies, SystemPermission};
