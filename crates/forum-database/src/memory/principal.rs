//! In-memory principal store.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;

use forum_core::error::AppError;
use forum_core::result::AppResult;
use forum_core::types::PrincipalId;
use forum_entity::principal::{
    CreatePrincipal, PrincipalKind, PrincipalRecord, PrincipalStatus, Role,
};

use crate::store::{LookupField, PrincipalStore};

/// Principal store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryPrincipalStore {
    rows: DashMap<PrincipalId, PrincipalRecord>,
    next_id: AtomicI64,
    /// Serializes the uniqueness check and the insert.
    write_lock: Mutex<()>,
}

impl MemoryPrincipalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(row: &PrincipalRecord, field: LookupField, value: &str) -> bool {
        match field {
            LookupField::Email => row.email.to_lowercase() == value.to_lowercase(),
            LookupField::Username => row.username == value,
        }
    }

    fn find_where(&self, pred: impl Fn(&PrincipalRecord) -> bool) -> Option<PrincipalRecord> {
        self.rows
            .iter()
            .find(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
    }

    fn modify(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
        f: impl FnOnce(&mut PrincipalRecord),
    ) -> AppResult<PrincipalRecord> {
        match self.rows.get_mut(&id) {
            Some(mut entry) if entry.kind == kind => {
                f(entry.value_mut());
                Ok(entry.value().clone())
            }
            _ => Err(AppError::not_found(format!("{kind} {id} not found"))),
        }
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn find_by_identifier(
        &self,
        kind: PrincipalKind,
        field: LookupField,
        value: &str,
    ) -> AppResult<Option<PrincipalRecord>> {
        Ok(self.find_where(|row| row.kind == kind && Self::matches(row, field, value)))
    }

    async fn find_by_id_and_kind(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
    ) -> AppResult<Option<PrincipalRecord>> {
        Ok(self
            .rows
            .get(&id)
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.value().clone()))
    }

    async fn create(&self, data: &CreatePrincipal) -> AppResult<PrincipalRecord> {
        if !data.kind.is_credentialed() {
            return Err(AppError::validation("Guests are not stored as principals"));
        }

        let _guard = self.write_lock.lock().await;

        if self
            .find_where(|row| {
                row.kind == data.kind && Self::matches(row, LookupField::Username, &data.username)
            })
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }
        if self
            .find_where(|row| {
                row.kind == data.kind && Self::matches(row, LookupField::Email, &data.email)
            })
            .is_some()
        {
            return Err(AppError::conflict("Email already in use"));
        }

        let id = PrincipalId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let record = PrincipalRecord {
            id,
            kind: data.kind,
            username: data.username.clone(),
            email: data.email.clone(),
            secret: data.secret.clone(),
            role: data.role,
            status: PrincipalStatus::Active,
            created_by: data.created_by,
            joined_at: Utc::now(),
        };
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update_status(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
        status: PrincipalStatus,
    ) -> AppResult<PrincipalRecord> {
        self.modify(kind, id, |row| row.status = status)
    }

    async fn update_role(&self, id: PrincipalId, role: Option<Role>) -> AppResult<PrincipalRecord> {
        self.modify(PrincipalKind::User, id, |row| row.role = role)
    }

    async fn update_secret(
        &self,
        kind: PrincipalKind,
        id: PrincipalId,
        secret: &str,
    ) -> AppResult<()> {
        self.modify(kind, id, |row| row.secret = secret.to_string())
            .map(|_| ())
    }

    async fn delete(&self, kind: PrincipalKind, id: PrincipalId) -> AppResult<bool> {
        Ok(self
            .rows
            .remove_if(&id, |_, row| row.kind == kind)
            .is_some())
    }

    async fn list_by_kind(&self, kind: PrincipalKind) -> AppResult<Vec<PrincipalRecord>> {
        let mut rows: Vec<PrincipalRecord> = self
            .rows
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use forum_core::error::ErrorKind;

    use super::*;

    fn new_principal(kind: PrincipalKind, username: &str, email: &str) -> CreatePrincipal {
        CreatePrincipal {
            kind,
            username: username.to_string(),
            email: email.to_string(),
            secret: "secret".to_string(),
            role: None,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let store = MemoryPrincipalStore::new();
        store
            .create(&new_principal(PrincipalKind::User, "bob", "Bob@Site.com"))
            .await
            .unwrap();

        let found = store
            .find_by_identifier(PrincipalKind::User, LookupField::Email, "bob@site.COM")
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_username_lookup_is_exact() {
        let store = MemoryPrincipalStore::new();
        store
            .create(&new_principal(PrincipalKind::User, "bob", "bob@site.com"))
            .await
            .unwrap();

        let found = store
            .find_by_identifier(PrincipalKind::User, LookupField::Username, "Bob")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_uniqueness_is_per_kind() {
        let store = MemoryPrincipalStore::new();
        store
            .create(&new_principal(PrincipalKind::Admin, "root", "shared@site.com"))
            .await
            .unwrap();
        store
            .create(&new_principal(PrincipalKind::User, "member", "SHARED@site.com"))
            .await
            .unwrap();

        let err = store
            .create(&new_principal(PrincipalKind::User, "other", "shared@SITE.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_concurrent_creates_yield_one_winner() {
        let store = Arc::new(MemoryPrincipalStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create(&new_principal(PrincipalKind::User, "race", "race@site.com"))
                        .await
                })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.list_by_kind(PrincipalKind::User).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_kind_scoping_on_mutation() {
        let store = MemoryPrincipalStore::new();
        let admin = store
            .create(&new_principal(PrincipalKind::Admin, "root", "root@site.com"))
            .await
            .unwrap();

        let err = store
            .update_status(PrincipalKind::User, admin.id, PrincipalStatus::Banned)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(!store.delete(PrincipalKind::User, admin.id).await.unwrap());
        assert!(store.delete(PrincipalKind::Admin, admin.id).await.unwrap());
    }
}
