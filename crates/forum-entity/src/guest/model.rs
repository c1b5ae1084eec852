//! Guest entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forum_core::types::GuestId;

/// A visitor admitted by name only. Guests have no secret and no status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    /// Row identifier.
    pub id: GuestId,
    /// Chosen display name.
    pub username: String,
    /// When the guest was admitted.
    pub joined_at: DateTime<Utc>,
}
