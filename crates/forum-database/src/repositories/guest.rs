//! Guest repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use forum_core::error::{AppError, ErrorKind};
use forum_core::result::AppResult;
use forum_core::types::GuestId;
use forum_entity::guest::Guest;

use crate::store::GuestStore;

#[derive(Debug, FromRow)]
struct GuestRow {
    id: GuestId,
    username: String,
    joined_at: DateTime<Utc>,
}

impl From<GuestRow> for Guest {
    fn from(row: GuestRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            joined_at: row.joined_at,
        }
    }
}

/// Repository for the `guests` table.
#[derive(Debug, Clone)]
pub struct PgGuestRepository {
    pool: PgPool,
}

impl PgGuestRepository {
    /// Create a new guest repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestStore for PgGuestRepository {
    async fn create(&self, username: &str) -> AppResult<Guest> {
        sqlx::query_as::<_, GuestRow>(
            "INSERT INTO guests (username) VALUES ($1) RETURNING id, username, joined_at",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map(Guest::from)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create guest", e))
    }

    async fn find_by_id(&self, id: GuestId) -> AppResult<Option<Guest>> {
        sqlx::query_as::<_, GuestRow>("SELECT id, username, joined_at FROM guests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Guest::from))
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find guest", e))
    }
}
