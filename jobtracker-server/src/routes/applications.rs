//! Job application routes

use crate::{
    app_state::AppState,
    error::AppResult,
    models::job_application::{JobApplication, NewJobApplication},
    setups::{ApplicationStore, ServerSetup},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

/// GET handler listing every job application
#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "All stored job applications", body = [JobApplication]),
        (status = 500, description = "Storage failure", body = crate::error::AppError),
    )
)]
pub async fn list<S: ServerSetup>(
    State(state): State<AppState<S>>,
) -> AppResult<Json<Vec<JobApplication>>> {
    let applications = state.store.find_all().await?;
    Ok(Json(applications))
}

/// POST handler for creating a job application
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = NewJobApplication,
    responses(
        (status = 200, description = "Stored job application with its new id", body = JobApplication),
        (status = 500, description = "Storage failure", body = crate::error::AppError),
    )
)]
pub async fn create<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Json(application): Json<NewJobApplication>,
) -> AppResult<Json<JobApplication>> {
    let created = state.store.save(None, application).await?;

    debug!(id = created.id, "Created job application");

    Ok(Json(created))
}

/// PUT handler replacing every field of a job application.
///
/// An unknown id is not an error: nothing is written and the body is `null`.
#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    request_body = NewJobApplication,
    params(
        ("id" = i64, Path, description = "Job application id"),
    ),
    responses(
        (status = 200, description = "Updated job application, or null if the id is unknown", body = JobApplication),
        (status = 500, description = "Storage failure", body = crate::error::AppError),
    )
)]
pub async fn update<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(replacement): Json<NewJobApplication>,
) -> AppResult<Json<Option<JobApplication>>> {
    let Some(existing) = state.store.find_by_id(id).await? else {
        debug!(id, "No job application to update");
        return Ok(Json(None));
    };

    let updated = state.store.save(Some(existing.id), replacement).await?;

    info!(
        subject = "job_application",
        category = "update",
        application = ?updated,
        "Updated job application"
    );

    Ok(Json(Some(updated)))
}

/// DELETE handler for removing a job application
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Job application id"),
    ),
    responses(
        (status = 200, description = "Deleted, or there was nothing to delete"),
        (status = 500, description = "Storage failure", body = crate::error::AppError),
    )
)]
pub async fn delete<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.store.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}
