//! JSON-lines audit log: one `LogEntry` per line, append-only.
//!
//! Storage location: `~/.docroute/audit/routing-log.jsonl` by default.
//!
//! Appends open the file in append mode and write a single line, so existing
//! history is never rewritten. Queries scan the whole file; lines that fail to
//! parse are skipped with a warning.

use async_trait::async_trait;
use docroute_core::audit::{AuditLog, LogEntry, LogFilter, MAX_QUERY_RESULTS};
use docroute_core::error::AuditError;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// A file-backed audit log using JSONL.
pub struct JsonlAuditLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlAuditLog {
    /// Open (or lazily create) the log at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "JSONL audit log opened");
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<LogEntry>, AuditError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AuditError::Query(format!("Failed to read audit log: {e}"))),
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<LogEntry>(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted audit log line");
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl AuditLog for JsonlAuditLog {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn append(&self, entry: LogEntry) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(&entry)
            .map_err(|e| AuditError::Write(format!("Failed to serialize log entry: {e}")))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AuditError::Write(format!("Failed to create audit directory: {e}")))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AuditError::Write(format!("Failed to open audit log: {e}")))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AuditError::Write(format!("Failed to write audit log: {e}")))?;
        file.flush()
            .await
            .map_err(|e| AuditError::Write(format!("Failed to flush audit log: {e}")))?;
        Ok(())
    }

    async fn query(&self, filter: &LogFilter) -> Result<Vec<LogEntry>, AuditError> {
        let entries = self.read_all().await?;
        Ok(entries
            .into_iter()
            .rev()
            .filter(|e| filter.matches(e))
            .take(MAX_QUERY_RESULTS)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use docroute_core::{DocType, ObjectLocation, RouteStatus};
    use tempfile::TempDir;

    fn entry(client: &str, status: RouteStatus) -> LogEntry {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let source = ObjectLocation::new("intake", format!("uploads/{client}/activity.csv"));
        LogEntry::new(&source, date, status).with_slot(client, DocType::DailyActivity)
    }

    #[tokio::test]
    async fn append_creates_file_and_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit").join("log.jsonl");
        let log = JsonlAuditLog::new(&path);

        log.append(entry("acme", RouteStatus::Received)).await.unwrap();
        log.append(entry("acme", RouteStatus::Processed)).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().next().unwrap().contains("RECEIVED"));
    }

    #[tokio::test]
    async fn history_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        {
            let log = JsonlAuditLog::new(&path);
            log.append(entry("acme", RouteStatus::Received)).await.unwrap();
            log.append(entry("globex", RouteStatus::Failed)).await.unwrap();
        }

        let reopened = JsonlAuditLog::new(&path);
        let failed = reopened.query(&LogFilter::Status(RouteStatus::Failed)).await.unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].client.as_deref(), Some("globex"));
    }

    #[tokio::test]
    async fn corrupted_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        let log = JsonlAuditLog::new(&path);
        log.append(entry("acme", RouteStatus::Received)).await.unwrap();

        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{not valid json\n\n");
        std::fs::write(&path, content).unwrap();
        log.append(entry("acme", RouteStatus::Processed)).await.unwrap();

        let acme = log.query(&LogFilter::Client("acme".into())).await.unwrap();
        assert_eq!(acme.len(), 2);
        assert_eq!(acme[0].status, RouteStatus::Processed);
    }

    #[tokio::test]
    async fn missing_file_queries_empty() {
        let dir = TempDir::new().unwrap();
        let log = JsonlAuditLog::new(dir.path().join("none.jsonl"));
        assert!(log.query(&LogFilter::Client("acme".into())).await.unwrap().is_empty());
    }
}
