//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the route handlers.
//! Methods return `Send` futures so handlers generic over [`Database`]
//! stay usable as axum handlers.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Post, PostInput, PostListItem},
};

/// Repository for Post operations.
pub trait PostRepository {
    /// List all posts as slug + title projections, in store order.
    fn list(&self) -> impl Future<Output = DbResult<Vec<PostListItem>>> + Send;

    /// Get a post by slug. `Ok(None)` when no such post exists.
    fn get(&self, slug: &str) -> impl Future<Output = DbResult<Option<Post>>> + Send;

    /// Insert a new post. Fails with `AlreadyExists` on a duplicate slug.
    fn create(&self, input: &PostInput) -> impl Future<Output = DbResult<Post>> + Send;

    /// Overwrite title and markdown of the post matching `input.slug`.
    fn update(&self, input: &PostInput) -> impl Future<Output = DbResult<Post>> + Send;

    /// Delete a post by slug. Fails with `NotFound` if nothing was deleted.
    fn delete(&self, slug: &str) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Posts<'a>: PostRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the post repository.
    fn posts(&self) -> Self::Posts<'_>;
}
