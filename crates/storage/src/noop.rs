//! No-op audit log: disables routing history entirely.

use async_trait::async_trait;
use docroute_core::audit::{AuditLog, LogEntry, LogFilter};
use docroute_core::error::AuditError;

/// An audit log that records nothing.
pub struct NoopAuditLog;

#[async_trait]
impl AuditLog for NoopAuditLog {
    fn name(&self) -> &str { "none" }

    async fn append(&self, _entry: LogEntry) -> Result<(), AuditError> {
        Ok(())
    }

    async fn query(&self, _filter: &LogFilter) -> Result<Vec<LogEntry>, AuditError> {
        Ok(Vec::new())
    }
}
