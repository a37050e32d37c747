//! Metrics middleware tracking HTTP requests.

use axum::{
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use std::time::Instant;

/// Middleware function called to track (and update) http metrics when a
/// route is requested.
pub async fn track<B>(req: Request<B>, next: Next<B>) -> impl IntoResponse {
    let start = Instant::now();

    let path = if let Some(matched_path) = req.extensions().get::<MatchedPath>() {
        matched_path.as_str().to_owned()
    } else {
        req.uri().path().to_owned()
    };

    let method = req.method().clone();
    let response = next.run(req).await;
    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    let labels = [
        ("method", method.to_string()),
        ("request_path", path),
        ("status", status),
    ];

    ::metrics::increment_counter!("http_requests_total", &labels);
    ::metrics::histogram!("http_requests_duration_seconds", latency, &labels);

    response
}
