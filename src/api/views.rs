//! Server-rendered HTML views.
//!
//! Templates live in `templates/` and are embedded into the binary at
//! compile time. Files under `templates/partials/` are registered as
//! partials by their file stem; every other file is a page named by its
//! path without the `.hbs` extension (e.g. `posts/detail`).

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use handlebars::Handlebars;
use rust_embed::RustEmbed;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::{ApiError, RouteError};

#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.hbs"]
#[include = "**/*.hbs"]
struct Templates;

const PARTIALS_DIR: &str = "partials/";
const TEMPLATE_EXT: &str = ".hbs";

/// Handlebars registry holding every page and partial.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// Load and compile all embedded templates.
    pub fn new() -> Result<Self, ApiError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);

        for path in Templates::iter() {
            let file = Templates::get(&path).ok_or_else(|| ApiError::Templates {
                message: format!("embedded template '{}' disappeared", path),
            })?;
            let source = std::str::from_utf8(&file.data).map_err(|e| ApiError::Templates {
                message: format!("{} is not UTF-8: {}", path, e),
            })?;

            let name = path.trim_end_matches(TEMPLATE_EXT);
            let registered = match name.strip_prefix(PARTIALS_DIR) {
                Some(partial) => registry.register_partial(partial, source),
                None => registry.register_template_string(name, source),
            };
            registered.map_err(|e| ApiError::Templates {
                message: format!("{}: {}", path, e),
            })?;
        }

        Ok(Self { registry })
    }

    pub fn has_page(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    /// Render a page to a string.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RouteError> {
        self.registry
            .render(name, data)
            .map_err(|e| RouteError::Internal {
                message: format!("failed to render {}: {}", name, e),
            })
    }

    /// Render a page into a response with the given status.
    ///
    /// A template failure falls back to the generic error page.
    pub fn page<T: Serialize>(&self, status: StatusCode, name: &str, data: &T) -> Response {
        match self.render(name, data) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                error!(error = %e, "template rendering failed");
                self.error_page(&e)
            }
        }
    }

    /// Render the fallback for a route error: the "sorry" page for a
    /// missing post, the generic error page for everything else.
    pub fn error_page(&self, err: &RouteError) -> Response {
        let rendered = match err {
            RouteError::NotFound { slug } => self.render(
                "not_found",
                &json!({ "page_title": "Not found", "slug": slug }),
            ),
            _ => self.render(
                "error",
                &json!({ "page_title": "Error", "message": err.to_string() }),
            ),
        };

        match rendered {
            Ok(body) => (err.status(), Html(body)).into_response(),
            // Last resort when the error templates themselves are broken
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}\n{}", err, e),
            )
                .into_response(),
        }
    }
}
