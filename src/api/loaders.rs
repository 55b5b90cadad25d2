//! Read-path handlers producing the data behind each page.
//!
//! Both the HTML pages and the JSON API call these; presentation is
//! layered on top.

use serde::Serialize;
use tracing::debug;

use super::{NEW_POST_SLUG, RouteError};
use crate::db::{Database, Post, PostListItem, PostRepository};
use crate::markdown;

/// A post ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub title: String,
    pub html: String,
}

pub async fn posts_index<D: Database>(db: &D) -> Result<Vec<PostListItem>, RouteError> {
    Ok(db.posts().list().await?)
}

pub async fn post_detail<D: Database>(db: &D, slug: &str) -> Result<PostDetail, RouteError> {
    let post = db
        .posts()
        .get(slug)
        .await?
        .ok_or_else(|| RouteError::NotFound {
            slug: slug.to_string(),
        })?;

    debug!(slug, "rendering post markdown");
    Ok(PostDetail {
        html: markdown::render(&post.markdown),
        title: post.title,
    })
}

/// Load the post behind an admin form. `None` for the `new` route.
pub async fn admin_post<D: Database>(db: &D, slug: &str) -> Result<Option<Post>, RouteError> {
    if slug == NEW_POST_SLUG {
        return Ok(None);
    }

    db.posts()
        .get(slug)
        .await?
        .map(Some)
        .ok_or_else(|| RouteError::NotFound {
            slug: slug.to_string(),
        })
}
