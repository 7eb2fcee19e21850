use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Logs one line per request: method, path, status, and latency.
/// Applied globally, before any guard runs.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        "{method} {path} -> {} ({} ms)",
        response.status().as_u16(),
        start.elapsed().as_millis()
    );

    response
}
