//! Route-level errors shared by the HTML pages and the JSON API.
//!
//! Validation failures are not errors here: they are recovered into a
//! [`FieldErrors`](super::FieldErrors) map. A `RouteError` is either the
//! expected absence of a post or something that went wrong.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::db::DbError;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Post '{slug}' not found")]
    #[diagnostic(code(blog::route::not_found))]
    NotFound { slug: String },

    #[error("{message}")]
    #[diagnostic(code(blog::route::bad_request))]
    BadRequest { message: String },

    #[error("{message}")]
    #[diagnostic(code(blog::route::conflict))]
    Conflict { message: String },

    #[error("{message}")]
    #[diagnostic(code(blog::route::internal))]
    Internal { message: String },
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::NotFound { .. } => StatusCode::NOT_FOUND,
            RouteError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RouteError::Conflict { .. } => StatusCode::CONFLICT,
            RouteError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RouteError::NotFound { .. })
    }
}

impl From<DbError> for RouteError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { id, .. } => RouteError::NotFound { slug: id },
            DbError::AlreadyExists { .. } => RouteError::Conflict {
                message: e.to_string(),
            },
            _ => {
                error!(error = %e, "database failure");
                RouteError::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Post 'hello' not found")]
    pub error: String,
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
