//! Job application model

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use utoipa::ToSchema;

use crate::db::schema::job_application;

#[derive(
    Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = job_application)]
#[serde(rename_all = "camelCase")]
/// A single tracked job application
pub struct JobApplication {
    /// Assigned by storage on creation, never changed afterwards
    #[schema(example = 1)]
    pub id: i64,
    /// Company applied to
    #[schema(example = "Acme")]
    pub company_name: String,
    /// Role applied for
    #[schema(example = "Engineer")]
    pub role_applied_for: String,
    /// Date of application. Stored as given, never parsed.
    #[schema(example = "2024-01-05")]
    pub date_applied: String,
    /// Free-form application status
    #[schema(example = "Applied")]
    pub status: String,
    /// Client-supplied day count
    #[schema(example = 0)]
    pub days_since_update: i32,
}

/// Payload for creating or replacing a [JobApplication].
///
/// Any `id` in the incoming JSON is ignored. Missing fields and explicit
/// `null`s decode to their defaults.
#[serde_as]
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Insertable, AsChangeset, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = job_application)]
#[serde(rename_all = "camelCase", default)]
pub struct NewJobApplication {
    /// Company applied to
    #[schema(example = "Acme")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub company_name: String,
    /// Role applied for
    #[schema(example = "Engineer")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub role_applied_for: String,
    /// Date of application
    #[schema(example = "2024-01-05")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub date_applied: String,
    /// Free-form application status
    #[schema(example = "Applied")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub status: String,
    /// Client-supplied day count
    #[schema(example = 0)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub days_since_update: i32,
}

impl NewJobApplication {
    /// Attach a storage identifier.
    pub fn with_id(self, id: i64) -> JobApplication {
        JobApplication {
            id,
            company_name: self.company_name,
            role_applied_for: self.role_applied_for,
            date_applied: self.date_applied,
            status: self.status,
            days_since_update: self.days_since_update,
        }
    }
}

impl From<JobApplication> for NewJobApplication {
    fn from(application: JobApplication) -> Self {
        Self {
            company_name: application.company_name,
            role_applied_for: application.role_applied_for,
            date_applied: application.date_applied,
            status: application.status,
            days_since_update: application.days_since_update,
        }
    }
}
