//! Principal repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use forum_core::error::{AppError, ErrorKind};
use forum_core::result::AppResult;
use forum_core::types::PrincipalId;
use forum_entity::principal::{
    CreatePrincipal, PrincipalKind, PrincipalRecord, PrincipalStatus, Role,
};

use super::unique_violation;
use crate::store::{LookupField, PrincipalStore};

const COLUMNS: &str =
    "id, kind, username, email, secret, role, status, created_by, joined_at";

/// Raw `principals` row. Enum columns are text so legacy spellings still load.
#[derive(Debug, FromRow)]
struct PrincipalRow {
    id: PrincipalId,
    kind: String,
    username: String,
    email: String,
    secret: String,
    role: Option<String>,
    status: String,
    created_by: Option<PrincipalId>,
    joined_at: DateTime<Utc>,
}

impl TryFrom<PrincipalRow> for PrincipalRecord {
    type Error = AppError;

    fn try_from(row: PrincipalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            kind: row.kind.parse()?,
            username: row.username,
            email: row.email,
            secret: row.secret,
            role: row.role.as_deref().map(str::parse).transpose()?,
            status: row.status.parse()?,
            created_by: row.created_by,
            joined_at: row.joined_at,
        })
    }
}

fn into_record(row: Option<PrincipalRow>) -> AppResult<Option<PrincipalRecord>> {
    row.map(PrincipalRecord::try_from).transpose()
}

/// Repository for the `principals` table.
#[derive(Debug, Clone)]
pub struct PgPrincipalRepository {
    pool: PgPool,
}

impl PgPrincipalRepository {
    /// Create a new principal repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalRepository {
    async fn find_by_identifier(
        &self,
        kind: PrincipalKind,
        field: LookupField,
        value: &str,
    ) -> AppResult<Option<PrincipalRecord>> {
        let predicate = match field {
            LookupField::Email => "LOWER(email) = LOWER($2)",
            LookupField::Username => "username = $2",
        };
        let sql = format!("SELECT {COLUMNS} FROM principals WHERE kind = $1 AND {predicate}");

        let row = sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(kind.as_str())
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to find {kind} by {field}"),
                    e,
                )
            })?;

        into_record(row)
    }

    async fn find_by_id_and_kind(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
    ) -> AppResult<Option<PrincipalRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM principals WHERE id = $1 AND kind = $2");
        let row = sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(id)
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to find {kind} by id"), e)
            })?;

        into_record(row)
    }

    async fn create(&self, data: &CreatePrincipal) -> AppResult<PrincipalRecord> {
        let sql = format!(
            "INSERT INTO principals (kind, username, email, secret, role, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(data.kind.as_str())
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.secret)
            .bind(data.role.map(|r| r.as_str()))
            .bind(data.created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match unique_violation(&e) {
                Some(constraint) if constraint.contains("email") => {
                    AppError::conflict("Email already in use")
                }
                Some(_) => {
                    AppError::conflict(format!("Username '{}' already exists", data.username))
                }
                None => AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to create {}", data.kind),
                    e,
                ),
            })?;

        PrincipalRecord::try_from(row)
    }

    async fn update_status(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
        status: PrincipalStatus,
    ) -> AppResult<PrincipalRecord> {
        let sql = format!(
            "UPDATE principals SET status = $3 WHERE id = $1 AND kind = $2 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(id)
            .bind(kind.as_str())
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?;

        into_record(row)?.ok_or_else(|| AppError::not_found(format!("{kind} {id} not found")))
    }

    async fn update_role(&self, id: PrincipalId, role: Option<Role>) -> AppResult<PrincipalRecord> {
        let sql = format!(
            "UPDATE principals SET role = $2 WHERE id = $1 AND kind = 'user' RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(id)
            .bind(role.map(|r| r.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?;

        into_record(row)?.ok_or_else(|| AppError::not_found(format!("user {id} not found")))
    }

    async fn update_secret(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
        secret: &str,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE principals SET secret = $3 WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind.as_str())
            .bind(secret)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update secret", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("{kind} {id} not found")));
        }
        Ok(())
    }

    async fn delete(&self, kind: PrincipalKind, id: PrincipalId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM principals WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to delete {kind}"), e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_kind(&self, kind: PrincipalKind) -> AppResult<Vec<PrincipalRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM principals WHERE kind = $1 ORDER BY id ASC");
        sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(kind.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to list {kind} rows"), e)
            })?
            .into_iter()
            .map(PrincipalRecord::try_from)
            .collect()
    }
}
