use api::{routes::routes, state::AppState};
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    let db = db::connect().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let app_state = AppState::new(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes(app_state).layer(cors);

    let addr = format!("{}:{}", common::config::host(), common::config::port());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("{} listening on {addr}", common::config::project_name());

    axum::serve(listener, app)
        .await
        .expect("Server crashed unexpectedly");
}

/// Logs to a daily-rolling file, and to stdout too when configured.
/// The file appender guard is leaked on purpose so logging survives for
/// the life of the process.
fn init_logging() {
    let file_appender = rolling::daily("logs", common::config::log_file());
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    Box::leak(Box::new(guard));

    let filter = EnvFilter::new(common::config::log_level());
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(file_writer).with_ansi(false));

    if common::config::log_to_stdout() {
        registry.with(fmt::layer()).init();
    } else {
        registry.init();
    }
}
