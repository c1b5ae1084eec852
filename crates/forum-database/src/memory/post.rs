//! In-memory post store.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use forum_core::error::AppError;
use forum_core::result::AppResult;
use forum_core::types::PostId;
use forum_entity::post::{CreatePost, Post};

use crate::store::{PostStore, PrincipalStore};

/// Post store held entirely in memory.
///
/// When built with [`MemoryPostStore::with_principals`] it rejects authors
/// whose id does not belong to a principal of the post's author kind, like
/// the composite foreign key on `posts`.
#[derive(Default)]
pub struct MemoryPostStore {
    rows: DashMap<PostId, Post>,
    next_id: AtomicI64,
    principals: Option<Arc<dyn PrincipalStore>>,
}

impl std::fmt::Debug for MemoryPostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPostStore")
            .field("rows", &self.rows.len())
            .field("checks_authors", &self.principals.is_some())
            .finish()
    }
}

impl MemoryPostStore {
    /// Create an empty store that accepts any author.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that checks authors against `principals`.
    pub fn with_principals(principals: Arc<dyn PrincipalStore>) -> Self {
        Self {
            principals: Some(principals),
            ..Self::default()
        }
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, data: &CreatePost) -> AppResult<Post> {
        if let Some(principals) = &self.principals {
            let (kind, id) = (data.author.kind(), data.author.id());
            if principals.find_by_id_and_kind(kind, id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "Author {kind} {id} does not exist"
                )));
            }
        }

        let post = Post {
            id: PostId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            thread_id: data.thread_id,
            author: data.author,
            content: data.content.clone(),
            created_at: Utc::now(),
        };
        self.rows.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> AppResult<Option<Post>> {
        Ok(self.rows.get(&id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use forum_core::error::ErrorKind;
    use forum_core::types::{PrincipalId, ThreadId};
    use forum_entity::post::PostAuthor;
    use forum_entity::principal::{CreatePrincipal, PrincipalKind};

    use super::*;
    use crate::memory::MemoryPrincipalStore;

    async fn seed(store: &MemoryPrincipalStore, kind: PrincipalKind, name: &str) -> PrincipalId {
        store
            .create(&CreatePrincipal {
                kind,
                username: name.to_string(),
                email: format!("{name}@site.com"),
                secret: "secret1".to_string(),
                role: None,
                created_by: None,
            })
            .await
            .unwrap()
            .id
    }

    fn post(author: PostAuthor) -> CreatePost {
        CreatePost {
            thread_id: ThreadId(1),
            author,
            content: "hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_author_must_match_kind() {
        let principals = Arc::new(MemoryPrincipalStore::new());
        let admin = seed(&principals, PrincipalKind::Admin, "root").await;
        let member = seed(&principals, PrincipalKind::User, "bob").await;
        let store = MemoryPostStore::with_principals(principals);

        let err = store.create(&post(PostAuthor::User(admin))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = store
            .create(&post(PostAuthor::Moderator(member)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = store
            .create(&post(PostAuthor::User(PrincipalId(99))))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let created = store.create(&post(PostAuthor::User(member))).await.unwrap();
        assert_eq!(created.author, PostAuthor::User(member));
    }
}
