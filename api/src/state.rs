//! Application state shared across Axum route handlers and guards.

use sea_orm::DatabaseConnection;

/// Central application state: a cloned, thread-safe handle on the single
/// bounded connection pool. The pool is the only shared mutable resource
/// between requests.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a cloned copy of the database connection, for contexts that
    /// require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
