//! Login credentials.

use std::fmt;

use forum_database::LookupField;

/// A credential pair as submitted by a login form.
#[derive(Clone)]
pub struct Credentials {
    /// Email or username, depending on `lookup`.
    pub identifier: String,
    /// The presented secret.
    pub secret: String,
    /// Which column `identifier` is matched against.
    pub lookup: LookupField,
}

impl Credentials {
    /// Credentials for the email login forms.
    pub fn by_email(email: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: email.into(),
            secret: secret.into(),
            lookup: LookupField::Email,
        }
    }

    /// Credentials for the legacy username login form.
    pub fn by_username(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: username.into(),
            secret: secret.into(),
            lookup: LookupField::Username,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .field("lookup", &self.lookup)
            .finish()
    }
}
