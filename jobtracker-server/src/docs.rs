//! OpenAPI doc generation.

use crate::{
    error::AppError,
    models::job_application::{JobApplication, NewJobApplication},
    routes::{applications, health, ping},
};
use utoipa::OpenApi;

/// API documentation generator.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck,
        ping::get,
        applications::list,
        applications::create,
        applications::update,
        applications::delete,
    ),
    components(
        schemas(
            AppError,
            JobApplication,
            NewJobApplication,
            health::HealthcheckResponse
        )
    ),
)]

/// Tied to OpenAPI documentation.
#[derive(Debug)]
pub struct ApiDoc;
