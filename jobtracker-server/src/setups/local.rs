//! Server setup for local development & easier integration testing

use crate::{
    models::job_application::{JobApplication, NewJobApplication},
    setups::{ApplicationStore, ServerSetup},
};
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::{collections::BTreeMap, sync::Arc};

/// Implementation of `ServerSetup` for local environments.
/// Runs without a database; everything is lost on restart.
#[derive(Debug, Clone)]
pub struct LocalSetup;

impl ServerSetup for LocalSetup {
    type ApplicationStore = InMemoryApplicationStore;
}

/// An `ApplicationStore` living in process memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryApplicationStore {
    inner: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    applications: BTreeMap<i64, JobApplication>,
}

impl InMemoryApplicationStore {
    /// Number of stored applications.
    pub fn len(&self) -> usize {
        self.inner.read().applications.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn find_all(&self) -> Result<Vec<JobApplication>> {
        Ok(self.inner.read().applications.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobApplication>> {
        Ok(self.inner.read().applications.get(&id).cloned())
    }

    async fn save(
        &self,
        id: Option<i64>,
        application: NewJobApplication,
    ) -> Result<JobApplication> {
        let mut state = self.inner.write();

        let id = match id {
            Some(id) => {
                state.last_id = state.last_id.max(id);
                id
            }
            None => {
                state.last_id += 1;
                state.last_id
            }
        };

        let saved = application.with_id(id);
        state.applications.insert(id, saved.clone());

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.inner.write().applications.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    fn sample(company_name: &str) -> NewJobApplication {
        NewJobApplication {
            company_name: company_name.into(),
            role_applied_for: "Engineer".into(),
            date_applied: "2024-01-05".into(),
            status: "Applied".into(),
            days_since_update: 0,
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_sequence() -> TestResult {
        let store = InMemoryApplicationStore::default();

        let first = store.save(None, sample("Acme")).await?;
        let second = store.save(None, sample("Acme")).await?;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() -> TestResult {
        let store = InMemoryApplicationStore::default();

        let first = store.save(None, sample("Acme")).await?;
        store.delete_by_id(first.id).await?;
        let second = store.save(None, sample("Initech")).await?;

        assert_ne!(first.id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_save_with_id_replaces_row() -> TestResult {
        let store = InMemoryApplicationStore::default();

        let created = store.save(None, sample("Acme")).await?;
        let replaced = store.save(Some(created.id), sample("Initech")).await?;

        assert_eq!(replaced.id, created.id);
        assert_eq!(store.find_all().await?, vec![replaced]);

        Ok(())
    }

    #[tokio::test]
    async fn test_save_with_id_recreates_deleted_row() -> TestResult {
        let store = InMemoryApplicationStore::default();

        let created = store.save(None, sample("Acme")).await?;
        store.delete_by_id(created.id).await?;
        assert!(store.is_empty());

        let resurrected = store.save(Some(created.id), sample("Acme")).await?;
        assert_eq!(resurrected, created);

        let next = store.save(None, sample("Initech")).await?;
        assert!(next.id > created.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_ok() -> TestResult {
        let store = InMemoryApplicationStore::default();
        store.delete_by_id(404).await?;
        assert_eq!(store.find_by_id(404).await?, None);
        Ok(())
    }
}
