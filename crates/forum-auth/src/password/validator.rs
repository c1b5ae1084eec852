//! Password policy enforcement for new secrets.

use forum_core::config::AuthConfig;
use forum_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Minimum zxcvbn score; zero disables the check.
    min_score: u8,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: config.password_min_score.min(4),
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if self.min_score > 0 {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if (estimate.score() as u8) < self.min_score {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password.",
                ));
            }
        }

        Ok(())
    }
}
