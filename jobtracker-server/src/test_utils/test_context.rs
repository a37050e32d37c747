//! Helpers for running isolated webserver instances
use crate::{
    app_state::AppState,
    router::setup_app_router,
    setups::local::{InMemoryApplicationStore, LocalSetup},
};
use axum::Router;

/// A router over its own empty in-memory store
#[derive(Debug)]
pub struct TestContext {
    app: Router,
    app_state: AppState<LocalSetup>,
}

impl TestContext {
    /// Create a new test context
    pub fn new() -> Self {
        let app_state = AppState::new(InMemoryApplicationStore::default());
        let app = setup_app_router(app_state.clone());

        Self { app, app_state }
    }

    /// The router under test
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Direct access to the store behind the router
    pub fn store(&self) -> &InMemoryApplicationStore {
        &self.app_state.store
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
