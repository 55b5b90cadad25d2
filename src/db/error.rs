//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(blog::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id '{id}'")]
    #[diagnostic(code(blog::db::already_exists))]
    AlreadyExists { entity_type: String, id: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(blog::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(blog::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(blog::db::connection_error),
        help("Check that the database path is writable, or pass --db to choose another file.")
    )]
    Connection { message: String },
}

impl DbError {
    pub(crate) fn post_not_found(slug: &str) -> Self {
        DbError::NotFound {
            entity_type: "Post".to_string(),
            id: slug.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
