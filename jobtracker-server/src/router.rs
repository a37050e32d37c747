//! Main [axum::Router] interface for webserver.

use crate::{
    app_state::AppState,
    routes::{applications, fallback::notfound_404, health, ping},
    setups::ServerSetup,
};
use axum::{
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Setup main router for application.
pub fn setup_app_router<S: ServerSetup>(app_state: AppState<S>) -> Router {
    let mut router = Router::new()
        .route("/ping", get(ping::get))
        .fallback(notfound_404)
        .with_state(app_state.clone());

    let cors = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT])
        // allow requests from any origin
        .allow_origin(Any);

    let api_router = Router::new()
        .route(
            "/applications",
            get(applications::list::<S>).post(applications::create::<S>),
        )
        .route(
            "/applications/:id",
            put(applications::update::<S>).delete(applications::delete::<S>),
        )
        .layer(cors)
        .with_state(app_state.clone());

    router = router.nest("/api", api_router);

    let healthcheck_router = Router::new()
        .route("/healthcheck", get(health::healthcheck::<S>))
        .with_state(app_state);

    Router::merge(router, healthcheck_router)
}
