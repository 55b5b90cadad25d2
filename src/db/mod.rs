//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for post storage,
//! allowing the storage backend to be swapped without touching the
//! route handlers.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Post, PostListItem, PostInput)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation

mod error;
mod models;
mod repository;
mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::{SqliteDatabase, SqlitePostRepository};
