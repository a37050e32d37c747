//! Rule-based extraction of job applications from recruiting emails.
//!
//! Each field comes from a fixed keyword or pattern rule over the email
//! body. Whatever no rule can fill becomes [UNKNOWN], except the company,
//! which falls back to the sender's domain.

use crate::models::job_application::NewJobApplication;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};

/// Value for fields no rule could determine.
pub const UNKNOWN: &str = "Unknown";

/// Date format of [JobEmail::date_received].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const JOB_KEYWORDS: &[&str] = &[
    "job",
    "application",
    "interview",
    "offer",
    "position",
    "role",
    "hiring",
    "career",
];

// A capture ends at " at", a period, or the end of the text. The end may
// be followed by one newline.
static COMPANY: Lazy<Regex> = Lazy::new(|| pattern(r"applied to\s+(.*?)(?:\s+at|\.|\n?\z)"));

static ROLES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        pattern(r"position of\s+(.*?)(?:\s+at|\.|\n?\z)"),
        pattern(r"role of\s+(.*?)(?:\s+at|\.|\n?\z)"),
        pattern(r"applied for\s+(.*?)(?:\s+at|\.|\n?\z)"),
    ]
});

static SENDER: Lazy<Regex> = Lazy::new(|| pattern(r"@([\w.-]+)"));

fn pattern(re: &str) -> Regex {
    Regex::new(&format!("(?i){re}")).expect("static pattern is valid")
}

/// One email exported from a mailbox.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobEmail {
    /// Subject line
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub subject: String,
    /// Plain-text body
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub body: String,
    /// Sender's organisation, e.g. `Acme`. Derived from `from` when absent.
    pub sender_domain: Option<String>,
    /// Raw `From` header, e.g. `Jobs <jobs@acme.com>`
    pub from: Option<String>,
    /// Day the email arrived, formatted as [DATE_FORMAT]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub date_received: String,
}

impl JobEmail {
    /// Whether the subject or body mentions any job-search keyword.
    pub fn is_job_related(&self) -> bool {
        let subject = self.subject.to_lowercase();
        let body = self.body.to_lowercase();

        JOB_KEYWORDS
            .iter()
            .any(|keyword| subject.contains(keyword) || body.contains(keyword))
    }

    /// The sender's organisation name.
    pub fn sender(&self) -> String {
        match (&self.sender_domain, &self.from) {
            (Some(domain), _) => domain.clone(),
            (None, Some(from)) => sender_domain_of(from),
            (None, None) => UNKNOWN.to_string(),
        }
    }

    /// Build the application this email describes, as of `today`.
    pub fn to_application(&self, today: NaiveDate) -> Result<NewJobApplication> {
        let role_applied_for = guess_role(&self.body);

        Ok(NewJobApplication {
            company_name: extract_company_name(&self.body).unwrap_or_else(|| self.sender()),
            status: guess_status(&self.body).to_string(),
            role_applied_for,
            days_since_update: days_since(&self.date_received, today)?,
            date_applied: self.date_received.clone(),
        })
    }
}

/// Company named in an "applied to ..." sentence, if any.
pub fn extract_company_name(text: &str) -> Option<String> {
    COMPANY
        .captures(text)
        .map(|captures| captures[1].trim().to_string())
        .filter(|company| !company.is_empty())
}

/// Role named by the first matching "position of", "role of" or
/// "applied for" phrase. [UNKNOWN] if none matches.
pub fn guess_role(text: &str) -> String {
    ROLES
        .iter()
        .find_map(|re| re.captures(text))
        .map_or_else(|| UNKNOWN.to_string(), |c| c[1].trim().to_string())
}

/// Status keyword with the highest precedence found in `text`.
pub fn guess_status(text: &str) -> &'static str {
    let text = text.to_lowercase();

    if text.contains("interview") || text.contains("scheduled") {
        "Interview Scheduled"
    } else if text.contains("shortlisted") {
        "Shortlisted"
    } else if text.contains("reject") || text.contains("not selected") {
        "Rejected"
    } else if text.contains("applied") {
        "Applied"
    } else {
        UNKNOWN
    }
}

/// Capitalized first label of the domain in a `From` header.
pub fn sender_domain_of(from: &str) -> String {
    let Some(captures) = SENDER.captures(from) else {
        return UNKNOWN.to_string();
    };

    let label = captures[1].split('.').next().unwrap_or_default();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Whole days from `date` (formatted as [DATE_FORMAT]) until `today`.
pub fn days_since(date: &str, today: NaiveDate) -> Result<i32> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .with_context(|| format!("Invalid date {date:?}, expected YYYY-MM-DD"))?;

    i32::try_from((today - date).num_days()).context("Day count out of range")
}
