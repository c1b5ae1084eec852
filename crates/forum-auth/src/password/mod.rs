//! Secret hashing, verification, and policy enforcement.

pub mod hasher;
pub mod validator;
pub mod verifier;

pub use hasher::PasswordHasher;
pub use validator::PasswordValidator;
pub use verifier::{
    Argon2Verifier, BcryptVerifier, PlaintextVerifier, SecretVerifier, SniffingVerifier,
    Verification, VerifierRegistry,
};
