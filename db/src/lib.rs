pub mod models;
pub mod test_utils;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;

/// Opens the shared connection pool against the configured store.
///
/// `DATABASE_PATH` may be a full DSN (`sqlite:`, `postgres://`, `mysql://`) or a
/// plain SQLite file path. The pool is the only shared resource between
/// requests, so it is bounded: at most 10 open connections, 5 kept idle, and a
/// lifetime cap to tolerate store-side connection recycling.
pub async fn connect() -> DatabaseConnection {
    let path_or_url = common::config::database_path();
    let url = if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url
    } else {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(10)
        .min_connections(5)
        .max_lifetime(Duration::from_secs(30 * 60))
        .sqlx_logging(false);

    Database::connect(opts)
        .await
        .expect("Failed to connect to database")
}
