//! Database configuration & connections

use std::time::Duration;

use anyhow::{Context, Result};
use bb8::PooledConnection;
use diesel_async::{
    pooled_connection::AsyncDieselConnectionManager, AsyncPgConnection, RunQueryDsl,
};

/// Type alias for the connection pool
pub type Pool = bb8::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Type alias for the connection
pub type Conn<'a> = PooledConnection<'a, AsyncDieselConnectionManager<AsyncPgConnection>>;

/// The one table this service owns. Created when missing; there is no
/// versioned migration history.
const CREATE_JOB_APPLICATION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS job_application (
    id BIGSERIAL PRIMARY KEY,
    company_name TEXT NOT NULL DEFAULT '',
    role_applied_for TEXT NOT NULL DEFAULT '',
    date_applied TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT '',
    days_since_update INT NOT NULL DEFAULT 0
)
"#;

/// Build the database pool
pub async fn pool(url: &str, connect_timeout: u64) -> Result<Pool> {
    tracing::info!(%connect_timeout, "Connecting to database via pool");

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(url);

    let pool = bb8::Pool::builder()
        .connection_timeout(Duration::from_secs(connect_timeout))
        .build(config)
        .await
        .context("Could not build database pool")?;

    Ok(pool)
}

/// Establish a connection
pub async fn connect(pool: &Pool) -> Result<Conn<'_>> {
    tracing::debug!("Creating a db connection from connection pool");
    pool.get()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to the database: {e}"))
}

/// Create the `job_application` table if it does not exist yet.
pub async fn ensure_schema(pool: &Pool) -> Result<()> {
    let conn = &mut connect(pool).await?;

    diesel::sql_query(CREATE_JOB_APPLICATION_TABLE)
        .execute(conn)
        .await
        .context("Could not create job_application table")?;

    tracing::info!(
        subject = "db_schema",
        category = "init",
        "job_application table ready"
    );

    Ok(())
}
