//! Bulk import of job applications from JSON exports.
//!
//! An application export is an array of snake_case objects, e.g.
//!
//! ```json
//! [{"company_name": "Acme", "role_applied_for": "Engineer",
//!   "date_applied": "2024-01-05", "status": "Applied", "days_since_update": 0}]
//! ```
//!
//! An email export is an array of [JobEmail]s, e.g.
//!
//! ```json
//! [{"subject": "Your application", "body": "You applied to Acme.",
//!   "from": "jobs@acme.com", "date_received": "2024-01-05"}]
//! ```

use crate::{
    mail::JobEmail,
    models::job_application::NewJobApplication,
    setups::ApplicationStore,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::{fs::File, io::BufReader, io::Read, path::Path};

/// One entry of an export file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportedApplication {
    company_name: String,
    role_applied_for: String,
    date_applied: String,
    status: String,
    days_since_update: i32,
}

impl From<ExportedApplication> for NewJobApplication {
    fn from(exported: ExportedApplication) -> Self {
        Self {
            company_name: exported.company_name,
            role_applied_for: exported.role_applied_for,
            date_applied: exported.date_applied,
            status: exported.status,
            days_since_update: exported.days_since_update,
        }
    }
}

/// Read an export and store every entry as a new application.
/// Returns how many were stored.
pub async fn import_applications<A, R>(store: &A, reader: R) -> Result<usize>
where
    A: ApplicationStore,
    R: Read,
{
    let exported: Vec<ExportedApplication> =
        serde_json::from_reader(reader).context("Could not parse job application export")?;

    let total = exported.len();
    for (index, application) in exported.into_iter().enumerate() {
        let saved = store
            .save(None, application.into())
            .await
            .with_context(|| format!("Could not store entry {index} of the export"))?;

        tracing::debug!(id = saved.id, company = %saved.company_name, "Imported job application");
    }

    Ok(total)
}

/// Read an email export and store an application for every job-related
/// email, dated relative to `today`. Returns how many were stored.
pub async fn import_emails<A, R>(store: &A, reader: R, today: NaiveDate) -> Result<usize>
where
    A: ApplicationStore,
    R: Read,
{
    let emails: Vec<JobEmail> =
        serde_json::from_reader(reader).context("Could not parse email export")?;

    let mut imported = 0;
    for (index, email) in emails.iter().enumerate() {
        if !email.is_job_related() {
            tracing::debug!(index, subject = %email.subject, "Skipping unrelated email");
            continue;
        }

        let application = email
            .to_application(today)
            .with_context(|| format!("Could not read entry {index} of the export"))?;
        let saved = store
            .save(None, application)
            .await
            .with_context(|| format!("Could not store entry {index} of the export"))?;

        tracing::debug!(id = saved.id, company = %saved.company_name, "Imported email");
        imported += 1;
    }

    Ok(imported)
}

/// [import_applications] from a file on disk.
pub async fn import_file<A: ApplicationStore>(store: &A, path: &Path) -> Result<usize> {
    import_applications(store, open(path)?).await
}

/// [import_emails] from a file on disk.
pub async fn import_email_file<A: ApplicationStore>(
    store: &A,
    path: &Path,
    today: NaiveDate,
) -> Result<usize> {
    import_emails(store, open(path)?, today).await
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setups::local::InMemoryApplicationStore;
    use testresult::TestResult;

    const EXPORT: &str = r#"[
        {
            "company_name": "Acme",
            "date_applied": "2024-01-05",
            "days_since_update": 3,
            "role_applied_for": "Engineer",
            "status": "Applied"
        },
        {
            "company_name": "Initech",
            "status": "Rejected"
        }
    ]"#;

    #[test_log::test(tokio::test)]
    async fn test_import_stores_every_entry() -> TestResult {
        let store = InMemoryApplicationStore::default();

        let imported = import_applications(&store, EXPORT.as_bytes()).await?;
        assert_eq!(imported, 2);

        let stored = store.find_all().await?;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].company_name, "Acme");
        assert_eq!(stored[0].days_since_update, 3);
        assert_eq!(stored[1].company_name, "Initech");
        assert_eq!(stored[1].role_applied_for, "");

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_import_rejects_malformed_export() {
        let store = InMemoryApplicationStore::default();

        let result = import_applications(&store, &b"{\"not\": \"an array\"}"[..]).await;

        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_import_emails_skips_unrelated() -> TestResult {
        let store = InMemoryApplicationStore::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");

        let export = r#"[
            {
                "subject": "Thanks for applying",
                "body": "You applied to Initech for the role of Analyst. You were not selected.",
                "from": "Careers <careers@initech.com>",
                "date_received": "2024-01-05"
            },
            {
                "subject": "Lunch",
                "body": "Pizza on friday?",
                "sender_domain": "Gmail",
                "date_received": "2024-01-06"
            },
            {
                "subject": "Interview invitation",
                "body": "We would like to meet you.",
                "sender_domain": "Globex",
                "date_received": "2024-01-07"
            }
        ]"#;

        let imported = import_emails(&store, export.as_bytes(), today).await?;
        assert_eq!(imported, 2);

        let stored = store.find_all().await?;
        assert_eq!(
            stored,
            vec![
                NewJobApplication {
                    company_name: "Initech for the role of Analyst".into(),
                    role_applied_for: "Analyst".into(),
                    date_applied: "2024-01-05".into(),
                    status: "Rejected".into(),
                    days_since_update: 3,
                }
                .with_id(1),
                NewJobApplication {
                    company_name: "Globex".into(),
                    role_applied_for: "Unknown".into(),
                    date_applied: "2024-01-07".into(),
                    status: "Unknown".into(),
                    days_since_update: 1,
                }
                .with_id(2),
            ]
        );

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_import_emails_rejects_bad_dates() {
        let store = InMemoryApplicationStore::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid date");
        let export = r#"[{"subject": "Job offer", "date_received": "yesterday"}]"#;

        let result = import_emails(&store, export.as_bytes(), today).await;

        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_import_missing_file() {
        let store = InMemoryApplicationStore::default();

        let result = import_file(&store, Path::new("does/not/exist.json")).await;

        assert!(result.is_err());
    }
}
