use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, warn};

/// Logs failed requests with their latency.
pub async fn log_failures(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();
    if status.is_server_error() {
        error!(%method, %path, %status, ?elapsed, "request failed");
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(%method, %path, %status, ?elapsed, "request rejected");
    }

    response
}
