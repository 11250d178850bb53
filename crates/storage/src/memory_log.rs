//! In-memory audit log: useful for testing and ephemeral runs.

use async_trait::async_trait;
use docroute_core::audit::{AuditLog, LogEntry, LogFilter, MAX_QUERY_RESULTS};
use docroute_core::error::AuditError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An audit log that keeps entries in append order in a Vec.
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// All entries in append order.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().await.clone()
    }

    /// Entries about one source object (by partition key), in append order.
    pub async fn entries_for(&self, pk: &str) -> Vec<LogEntry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.pk == pk)
            .cloned()
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for InMemoryAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    fn name(&self) -> &str {
        "memory"
    }

    async fn append(&self, entry: LogEntry) -> Result<(), AuditError> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn query(&self, filter: &LogFilter) -> Result<Vec<LogEntry>, AuditError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .rev()
            .filter(|e| filter.matches(e))
            .take(MAX_QUERY_RESULTS)
            .cloned()
            .collect())
    }
}
