//! Post repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use forum_core::error::{AppError, ErrorKind};
use forum_core::result::AppResult;
use forum_core::types::{PostId, ThreadId};
use forum_entity::post::{CreatePost, Post, PostAuthor};

use super::foreign_key_violation;
use crate::store::PostStore;

const COLUMNS: &str = "id, thread_id, author_kind, author_id, content, created_at";

#[derive(Debug, FromRow)]
struct PostRow {
    id: PostId,
    thread_id: ThreadId,
    author_kind: String,
    author_id: i64,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = AppError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            thread_id: row.thread_id,
            author: PostAuthor::from_parts(&row.author_kind, row.author_id)?,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

/// Repository for the `posts` table.
#[derive(Debug, Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostRepository {
    async fn create(&self, data: &CreatePost) -> AppResult<Post> {
        let sql = format!(
            "INSERT INTO posts (thread_id, author_kind, author_id, content) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(data.thread_id)
            .bind(data.author.kind().as_str())
            .bind(data.author.id())
            .bind(&data.content)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if foreign_key_violation(&e) {
                    AppError::validation(format!(
                        "Author {} {} does not exist",
                        data.author.kind(),
                        data.author.id()
                    ))
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to create post", e)
                }
            })?;

        Post::try_from(row)
    }

    async fn find_by_id(&self, id: PostId) -> AppResult<Option<Post>> {
        let sql = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))?
            .map(Post::try_from)
            .transpose()
    }
}
