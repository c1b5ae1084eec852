//! Post creation and lookup.

use std::sync::Arc;

use tracing::info;

use forum_core::error::AppError;
use forum_core::types::{PostId, PrincipalId, ThreadId};
use forum_database::PostStore;
use forum_entity::post::{CreatePost, Post, PostAuthor};

use crate::context::RequestContext;

/// Creates and reads posts.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl std::fmt::Debug for PostService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostService").finish_non_exhaustive()
    }
}

impl PostService {
    /// Creates a new post service.
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    /// Writes a post as the acting principal. Only members and moderators author.
    pub async fn create_post(
        &self,
        ctx: &RequestContext,
        thread_id: ThreadId,
        content: &str,
    ) -> Result<Post, AppError> {
        let author = PostAuthor::from_principal(ctx.principal_kind, PrincipalId(ctx.principal_id))
            .ok_or_else(|| {
                AppError::forbidden(format!("A {} cannot author posts", ctx.principal_kind))
            })?;

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Post content must not be empty"));
        }

        let post = self
            .posts
            .create(&CreatePost {
                thread_id,
                author,
                content: content.to_string(),
            })
            .await?;

        info!(
            post_id = %post.id,
            thread_id = %thread_id,
            author_kind = %author.kind(),
            author_id = %author.id(),
            "Post created"
        );
        Ok(post)
    }

    /// Gets a post by id.
    pub async fn get_post(&self, id: PostId) -> Result<Post, AppError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Post {id} not found")))
    }
}
