//! Application state for the server.

use std::sync::Arc;

use super::{Env, Views};
use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` so tests can run against an in-memory
/// store. Everything is behind `Arc` and immutable after startup.
pub struct AppState<D: Database> {
    db: Arc<D>,
    views: Arc<Views>,
    env: Arc<Env>,
}

// Manual Clone impl - we only need Arc to be cloneable, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            views: Arc::clone(&self.views),
            env: Arc::clone(&self.env),
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState with the given database, views and environment.
    pub fn new(db: D, views: Views, env: Env) -> Self {
        Self {
            db: Arc::new(db),
            views: Arc::new(views),
            env: Arc::new(env),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a reference to the template registry.
    pub fn views(&self) -> &Views {
        &self.views
    }

    /// Get a reference to the public environment.
    pub fn env(&self) -> &Env {
        &self.env
    }
}
