//! Domain models for the blog database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

/// URL-safe unique identifier of a post.
pub type Slug = String;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub slug: Slug,
    pub title: String,
    pub markdown: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Listing projection of a post: never carries the markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListItem {
    pub slug: Slug,
    pub title: String,
}

impl From<Post> for PostListItem {
    fn from(p: Post) -> Self {
        Self {
            slug: p.slug,
            title: p.title,
        }
    }
}

/// Writable fields of a post.
///
/// Used for both create and update. On update the slug is only the
/// lookup key; it is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInput {
    pub slug: Slug,
    pub title: String,
    pub markdown: String,
}

impl PostInput {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            markdown: markdown.into(),
        }
    }
}
