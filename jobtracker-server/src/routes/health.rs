//! Healthcheck route.

use crate::{
    app_state::AppState,
    error::AppResult,
    setups::{ApplicationStore, ServerSetup},
};
use axum::{self, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// A healthcheck response containing diagnostic information for the service
#[derive(ToSchema, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct HealthcheckResponse {
    storage_connected: bool,
}

impl HealthcheckResponse {
    /// Whether the service is healthy
    pub fn is_healthy(&self) -> bool {
        self.storage_connected
    }

    /// The status code for the healthcheck response
    pub fn status_code(&self) -> StatusCode {
        if self.is_healthy() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET handler for checking service health.
#[utoipa::path(
    get,
    path = "/healthcheck",
    responses(
        (status = 200, description = "jobtracker-server healthy", body=HealthcheckResponse),
        (status = 503, description = "jobtracker-server not healthy", body=HealthcheckResponse)
    )
)]
pub async fn healthcheck<S: ServerSetup>(
    State(state): State<AppState<S>>,
) -> AppResult<(StatusCode, axum::Json<serde_json::Value>)> {
    let storage_connected = match state.store.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(?err, "Storage ping failed");
            false
        }
    };

    let response = HealthcheckResponse { storage_connected };

    Ok((response.status_code(), axum::Json(json! { response})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{route_builder::RouteBuilder, test_context::TestContext};
    use http::Method;
    use testresult::TestResult;

    #[test]
    fn test_unhealthy_status_code() {
        let response = HealthcheckResponse {
            storage_connected: false,
        };

        assert!(!response.is_healthy());
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test_log::test(tokio::test)]
    async fn test_healthcheck() -> TestResult {
        let ctx = TestContext::new();

        let (status, body) = RouteBuilder::new(ctx.app(), Method::GET, "/healthcheck")
            .into_json_response::<HealthcheckResponse>()
            .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            HealthcheckResponse {
                storage_connected: true
            }
        );

        Ok(())
    }
}
