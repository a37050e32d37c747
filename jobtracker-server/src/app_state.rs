//! The Axum Application State

use crate::setups::ServerSetup;

#[derive(Clone)]
/// Global application route state.
pub struct AppState<S: ServerSetup> {
    /// Where job applications are kept
    pub store: S::ApplicationStore,
}

impl<S: ServerSetup> AppState<S> {
    /// Create the state around a store.
    pub fn new(store: S::ApplicationStore) -> Self {
        Self { store }
    }
}

impl<S> std::fmt::Debug for AppState<S>
where
    S: ServerSetup,
    S::ApplicationStore: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .finish()
    }
}
