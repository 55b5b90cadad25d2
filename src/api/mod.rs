//! HTTP layer: HTML pages, the JSON API and the server entry point.

mod actions;
mod error;
mod handlers;
mod loaders;
pub mod routes;
mod state;
mod static_assets;
mod submission;
mod v1;
mod views;

#[cfg(test)]
mod actions_test;
#[cfg(test)]
mod mod_test;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

pub use actions::ActionOutcome;
pub use error::{ErrorResponse, RouteError};
pub use state::AppState;
pub use submission::{FieldErrors, Intent, NEW_POST_SLUG, PostForm, Submission, SubmissionError};
pub use views::Views;

/// Where every successful mutation redirects to.
pub const ADMIN_PATH: &str = "/posts/admin";

/// Errors that stop the server from starting or serving.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Required environment variable {name} is not set")]
    #[diagnostic(
        code(blog::api::missing_env),
        help("Export ADMIN_EMAIL before starting the server, or pass --admin-email.")
    )]
    MissingEnv { name: String },

    #[error("Failed to load view templates: {message}")]
    #[diagnostic(code(blog::api::templates))]
    Templates { message: String },

    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(code(blog::api::bind), help("Is another process using this port? Try --port."))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(blog::api::serve))]
    Serve(#[from] std::io::Error),
}

/// API server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

/// Public environment handed to request handlers.
///
/// Loaded once at startup and carried in [`AppState`]; handlers never
/// read the process environment themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    pub admin_email: String,
}

impl Env {
    pub const ADMIN_EMAIL: &'static str = "ADMIN_EMAIL";

    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }

    /// Read the environment from process variables.
    ///
    /// `ADMIN_EMAIL` is required; an unset or empty value is an error.
    pub fn from_env() -> Result<Self, ApiError> {
        match env::var(Self::ADMIN_EMAIL) {
            Ok(value) if !value.is_empty() => Ok(Self::new(value)),
            _ => Err(ApiError::MissingEnv {
                name: Self::ADMIN_EMAIL.to_string(),
            }),
        }
    }

    /// Resolve the environment with precedence: CLI flag > env var.
    pub fn resolve(admin_email: Option<String>) -> Result<Self, ApiError> {
        match admin_email {
            Some(email) if !email.is_empty() => Ok(Self::new(email)),
            _ => Self::from_env(),
        }
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the server with the given configuration, environment and database.
pub async fn run<D: Database + 'static>(config: Config, env: Env, db: D) -> Result<(), ApiError> {
    let views = Views::new()?;
    let state = AppState::new(db, views, env);

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    info!("Blog server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
