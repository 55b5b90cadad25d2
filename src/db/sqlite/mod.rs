//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod post;

#[cfg(test)]
mod post_test;

pub use connection::SqliteDatabase;
pub use post::SqlitePostRepository;
