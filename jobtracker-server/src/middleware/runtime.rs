//! Middleware for runtime, [tower_http] extensions.

use crate::error::AppError;
use axum::response::{IntoResponse, Response};
use std::any::Any;

/// Middleware function for catching runtime panics, logging
/// them, and converting them into a `500 Internal Server` response.
pub fn catch_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    let err: AppError = anyhow::anyhow!(details).into();
    err.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::parse_error;
    use axum::{body::Body, routing::get, Router};
    use http::{Request, StatusCode};
    use testresult::TestResult;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn boom() -> StatusCode {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_server_error() -> TestResult {
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(catch_panic));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = parse_error(response).await;
        assert_eq!(err.detail.as_deref(), Some("boom"));

        Ok(())
    }
}
