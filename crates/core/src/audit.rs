//! Routing audit log: append-only status history per source object.
//!
//! Every routing attempt writes a causal chain of entries keyed by the
//! source object's URI: `RECEIVED` first, then optionally `ARCHIVING`, then
//! exactly one of `PROCESSED` or `FAILED`. Entries are never mutated.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::DocType;
use crate::error::AuditError;
use crate::location::ObjectLocation;

/// Maximum number of entries a single log query returns.
pub const MAX_QUERY_RESULTS: usize = 200;

/// Routing status recorded in a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStatus {
    Received,
    Archiving,
    Processed,
    Failed,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Received => "RECEIVED",
            RouteStatus::Archiving => "ARCHIVING",
            RouteStatus::Processed => "PROCESSED",
            RouteStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RECEIVED" => Ok(RouteStatus::Received),
            "ARCHIVING" => Ok(RouteStatus::Archiving),
            "PROCESSED" => Ok(RouteStatus::Processed),
            "FAILED" => Ok(RouteStatus::Failed),
            other => Err(format!("unknown routing status '{other}'")),
        }
    }
}

/// A single audit log entry.
///
/// Contextual fields are only populated where they apply to the status:
/// `dest` on ARCHIVING/PROCESSED, `error` on FAILED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Partition key: `s3://<bucket>/<key>` of the triggering object
    pub pk: String,

    /// Sort key: `YYYY-MM-DD`
    pub sk: String,

    pub status: RouteStatus,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_bucket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Free-form remark, e.g. that classification fell back to the default type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LogEntry {
    /// Start an entry about `source` on `date` with the source fields filled in.
    pub fn new(source: &ObjectLocation, date: NaiveDate, status: RouteStatus) -> Self {
        Self {
            pk: source.uri(),
            sk: date.format("%Y-%m-%d").to_string(),
            status,
            timestamp: Utc::now(),
            client: None,
            doc_type: None,
            src_bucket: Some(source.bucket.clone()),
            src_key: Some(source.key.clone()),
            dest: None,
            error: None,
            note: None,
        }
    }

    pub fn with_slot(mut self, client: &str, doc_type: DocType) -> Self {
        self.client = Some(client.to_string());
        self.doc_type = Some(doc_type.as_str().to_string());
        self
    }

    pub fn with_dest(mut self, dest: &ObjectLocation) -> Self {
        self.dest = Some(dest.uri());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// How to filter a log query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFilter {
    Client(String),
    Status(RouteStatus),
}

impl LogFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            LogFilter::Client(client) => entry.client.as_deref() == Some(client.as_str()),
            LogFilter::Status(status) => entry.status == *status,
        }
    }
}

/// The core AuditLog trait.
///
/// Implementations: in-memory (testing), JSON-lines file, none (no-op).
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// The backend name (e.g., "memory", "jsonl", "none").
    fn name(&self) -> &str;

    /// Append an entry.
    async fn append(&self, entry: LogEntry) -> Result<(), AuditError>;

    /// Matching entries, newest first, at most [`MAX_QUERY_RESULTS`].
    async fn query(&self, filter: &LogFilter) -> Result<Vec<LogEntry>, AuditError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> ObjectLocation {
        ObjectLocation::new("intake", "uploads/acme/activity-2024.csv")
    }

    #[test]
    fn entry_keys() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let entry = LogEntry::new(&source(), date, RouteStatus::Received);
        assert_eq!(entry.pk, "s3://intake/uploads/acme/activity-2024.csv");
        assert_eq!(entry.sk, "2024-03-09");
        assert_eq!(entry.src_bucket.as_deref(), Some("intake"));
    }

    #[test]
    fn inapplicable_fields_are_omitted() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let entry = LogEntry::new(&source(), date, RouteStatus::Received)
            .with_slot("acme", DocType::DailyActivity);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"status\":\"RECEIVED\""));
        assert!(json.contains("\"doc_type\":\"daily-activity\""));
        assert!(!json.contains("\"dest\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!("failed".parse::<RouteStatus>(), Ok(RouteStatus::Failed));
        assert_eq!("PROCESSED".parse::<RouteStatus>(), Ok(RouteStatus::Processed));
        assert!("DONE".parse::<RouteStatus>().is_err());
    }

    #[test]
    fn filter_matching() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let entry = LogEntry::new(&source(), date, RouteStatus::Failed)
            .with_slot("acme", DocType::DailyActivity)
            .with_error("boom");

        assert!(LogFilter::Client("acme".into()).matches(&entry));
        assert!(!LogFilter::Client("globex".into()).matches(&entry));
        assert!(LogFilter::Status(RouteStatus::Failed).matches(&entry));
        assert!(!LogFilter::Status(RouteStatus::Processed).matches(&entry));
    }
}
