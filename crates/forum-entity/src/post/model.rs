//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forum_core::types::{PostId, ThreadId};

use super::author::PostAuthor;

/// A post inside a discussion thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier.
    pub id: PostId,
    /// Owning thread.
    pub thread_id: ThreadId,
    /// The single author.
    pub author: PostAuthor,
    /// Post body.
    pub content: String,
    /// When the post was written.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    /// Owning thread.
    pub thread_id: ThreadId,
    /// The single author.
    pub author: PostAuthor,
    /// Post body.
    pub content: String,
}
