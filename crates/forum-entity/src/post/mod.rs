//! Post domain entities.

pub mod author;
pub mod model;

pub use author::PostAuthor;
pub use model::{CreatePost, Post};
