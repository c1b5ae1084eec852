//! Request DTOs.

use serde::Deserialize;
use validator::Validate;

use forum_core::types::ThreadId;

/// Email login request.
#[derive(Deserialize)]
pub struct LoginRequest {
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// Username login request.
#[derive(Deserialize)]
pub struct UsernameLoginRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// Guest admission request.
#[derive(Debug, Deserialize)]
pub struct GuestRequest {
    /// Display name for the guest.
    pub username: String,
}

/// Admin request to create a principal of any credentialed kind.
#[derive(Deserialize)]
pub struct CreatePrincipalRequest {
    /// `admin`, `moderator`, or `user`.
    pub kind: String,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// Status change request.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// Target status.
    pub status: String,
}

/// Role change request. `null` clears the explicit role.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    /// Target role.
    pub role: Option<String>,
}

/// Secret reset request.
#[derive(Deserialize)]
pub struct ResetSecretRequest {
    /// New password.
    pub password: String,
}

/// Create post request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Owning thread.
    pub thread_id: ThreadId,
    /// Post body.
    #[validate(length(min = 1, max = 20000, message = "Content must be 1-20000 characters"))]
    pub content: String,
}
