//! This abstracts the server's storage side-effects into "setups".
//!
//! This module defines the traits, submodules define production & local
//! collections of implementations.
use anyhow::Result;
use async_trait::async_trait;

use crate::models::job_application::{JobApplication, NewJobApplication};

pub mod local;
pub mod prod;

/// This trait groups type parameters to the server's `AppState` struct.
///
/// It captures the setup of the server, distinguishing between e.g.
/// local/testing & production setups.
pub trait ServerSetup: Clone + Send + Sync + 'static {
    /// Which implementation of application storage to choose
    type ApplicationStore: ApplicationStore;
}

/// CRUD access to stored job applications, keyed by their `id`.
///
/// Every method is a single call against the underlying storage. Nothing
/// here coordinates across calls, so a lookup followed by a save is not
/// atomic.
#[async_trait]
pub trait ApplicationStore: Clone + Send + Sync + 'static {
    /// All stored applications.
    async fn find_all(&self) -> Result<Vec<JobApplication>>;

    /// The application with this `id`, if any.
    async fn find_by_id(&self, id: i64) -> Result<Option<JobApplication>>;

    /// Persist an application.
    ///
    /// Without an `id` a new row is inserted and storage assigns the id.
    /// With an `id` the row with that id is replaced, or written anew if
    /// it has disappeared in the meantime.
    async fn save(&self, id: Option<i64>, application: NewJobApplication)
        -> Result<JobApplication>;

    /// Remove the application with this `id`. Missing ids are not an error.
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Check that storage is reachable.
    async fn ping(&self) -> Result<()>;
}
