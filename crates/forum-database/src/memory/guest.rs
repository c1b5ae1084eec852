//! In-memory guest store.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use forum_core::result::AppResult;
use forum_core::types::GuestId;
use forum_entity::guest::Guest;

use crate::store::GuestStore;

/// Guest store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryGuestStore {
    rows: DashMap<GuestId, Guest>,
    next_id: AtomicI64,
}

impl MemoryGuestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuestStore for MemoryGuestStore {
    async fn create(&self, username: &str) -> AppResult<Guest> {
        let guest = Guest {
            id: GuestId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            username: username.to_string(),
            joined_at: Utc::now(),
        };
        self.rows.insert(guest.id, guest.clone());
        Ok(guest)
    }

    async fn find_by_id(&self, id: GuestId) -> AppResult<Option<Guest>> {
        Ok(self.rows.get(&id).map(|entry| entry.value().clone()))
    }
}
