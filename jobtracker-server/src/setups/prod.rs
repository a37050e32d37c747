//! Production server setup code

use crate::{
    db::{self, schema::job_application, Pool},
    models::job_application::{JobApplication, NewJobApplication},
    setups::{ApplicationStore, ServerSetup},
};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

/// Production implementation of `ServerSetup`.
/// Stores applications in the PostgreSQL database configured in `settings.toml`.
#[derive(Clone, Debug, Default)]
pub struct ProdSetup;

impl ServerSetup for ProdSetup {
    type ApplicationStore = PgApplicationStore;
}

/// An implementation of `ApplicationStore` backed by the `job_application`
/// table.
#[derive(Clone, Debug)]
pub struct PgApplicationStore {
    db_pool: Pool,
}

impl PgApplicationStore {
    /// Wrap a database pool.
    pub fn new(db_pool: Pool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn find_all(&self) -> Result<Vec<JobApplication>> {
        let conn = &mut db::connect(&self.db_pool).await?;

        let applications = job_application::table
            .order(job_application::id.asc())
            .select(JobApplication::as_select())
            .load(conn)
            .await?;

        Ok(applications)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobApplication>> {
        let conn = &mut db::connect(&self.db_pool).await?;

        let application = job_application::table
            .find(id)
            .select(JobApplication::as_select())
            .first(conn)
            .await
            .optional()?;

        Ok(application)
    }

    async fn save(
        &self,
        id: Option<i64>,
        application: NewJobApplication,
    ) -> Result<JobApplication> {
        let conn = &mut db::connect(&self.db_pool).await?;

        let saved = match id {
            None => {
                diesel::insert_into(job_application::table)
                    .values(&application)
                    .returning(JobApplication::as_returning())
                    .get_result(conn)
                    .await?
            }
            // Upsert, so a row deleted between lookup and save comes back
            // under the same id.
            Some(id) => {
                diesel::insert_into(job_application::table)
                    .values((
                        job_application::id.eq(id),
                        job_application::company_name.eq(&application.company_name),
                        job_application::role_applied_for.eq(&application.role_applied_for),
                        job_application::date_applied.eq(&application.date_applied),
                        job_application::status.eq(&application.status),
                        job_application::days_since_update.eq(application.days_since_update),
                    ))
                    .on_conflict(job_application::id)
                    .do_update()
                    .set(&application)
                    .returning(JobApplication::as_returning())
                    .get_result(conn)
                    .await?
            }
        };

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let conn = &mut db::connect(&self.db_pool).await?;

        let deleted = diesel::delete(job_application::table.find(id))
            .execute(conn)
            .await?;

        tracing::debug!(id, deleted, "Deleted job application rows");

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let conn = &mut db::connect(&self.db_pool).await?;

        diesel::sql_query("SELECT 1")
            .execute(conn)
            .await
            .context("Database did not answer ping")?;

        Ok(())
    }
}
