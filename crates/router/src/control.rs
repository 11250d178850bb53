//! Operator actions: log listing, retry, force-route, and restore.
//!
//! None of these touch the routing state machine directly. Retry and
//! force-route enqueue a fresh notification; restore copies an archived
//! version back into intake, where the next routing run picks it up.

use chrono::NaiveDate;
use docroute_config::StorageConfig;
use docroute_core::audit::{AuditLog, LogEntry, LogFilter, RouteStatus};
use docroute_core::error::{AuditError, QueueError, StorageError};
use docroute_core::event::encode_notification;
use docroute_core::location::ObjectLocation;
use docroute_core::queue::{EventQueue, QueueMessage};
use docroute_core::storage::ObjectStore;
use docroute_core::DocType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::keys;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl ControlError {
    /// Whether the caller sent something unusable (as opposed to a backend fault).
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidRequest(_) => true,
            Self::Storage(e) => e.is_not_found() || matches!(e, StorageError::InvalidKey { .. }),
            Self::Queue(_) | Self::Audit(_) => false,
        }
    }
}

/// Restore an archived version back into intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreRequest {
    pub client: String,
    pub doc_type: String,

    /// Archive date, `YYYY-MM-DD`
    pub date: String,
    pub filename: String,

    /// Also enqueue the restored object for routing
    #[serde(default)]
    pub retry: bool,
}

pub struct ControlPlane {
    store: Arc<dyn ObjectStore>,
    audit: Arc<dyn AuditLog>,
    queue: Arc<dyn EventQueue>,
    intake_bucket: String,
    archive_bucket: String,
}

impl ControlPlane {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        audit: Arc<dyn AuditLog>,
        queue: Arc<dyn EventQueue>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            store,
            audit,
            queue,
            intake_bucket: config.intake_bucket.clone(),
            archive_bucket: config.archive_bucket.clone(),
        }
    }

    pub fn intake_bucket(&self) -> &str {
        &self.intake_bucket
    }

    /// Newest-first log entries for one client or one status.
    ///
    /// `client` takes precedence when both are given; neither yields nothing.
    pub async fn list_logs(
        &self,
        client: Option<&str>,
        status: Option<RouteStatus>,
    ) -> Result<Vec<LogEntry>, ControlError> {
        let filter = match (client, status) {
            (Some(client), _) if !client.is_empty() => LogFilter::Client(client.to_string()),
            (_, Some(status)) => LogFilter::Status(status),
            _ => return Ok(Vec::new()),
        };
        Ok(self.audit.query(&filter).await?)
    }

    /// Enqueue a routing notification for any object.
    pub async fn retry(&self, bucket: &str, key: &str) -> Result<(), ControlError> {
        if bucket.is_empty() || key.is_empty() {
            return Err(ControlError::InvalidRequest("bucket and key are required".into()));
        }
        self.enqueue(&ObjectLocation::new(bucket, key)).await
    }

    /// Enqueue a routing notification for a key in the intake bucket.
    pub async fn force_route(&self, key: &str) -> Result<(), ControlError> {
        if key.is_empty() {
            return Err(ControlError::InvalidRequest("key is required".into()));
        }
        let location = ObjectLocation::new(&self.intake_bucket, key);
        self.enqueue(&location).await
    }

    /// Copy an archived version into intake and return its intake key.
    pub async fn restore(&self, request: &RestoreRequest) -> Result<String, ControlError> {
        let doc_type: DocType = request.doc_type.parse().map_err(ControlError::InvalidRequest)?;
        let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
            .map_err(|_| ControlError::InvalidRequest(format!("invalid date '{}', expected YYYY-MM-DD", request.date)))?;
        if request.client.is_empty() || request.client.contains('/') {
            return Err(ControlError::InvalidRequest(format!("invalid client '{}'", request.client)));
        }
        if request.filename.is_empty() {
            return Err(ControlError::InvalidRequest("filename is required".into()));
        }

        let archived = ObjectLocation::new(
            &self.archive_bucket,
            keys::archive_key(&request.client, doc_type, date, &request.filename),
        );
        let restored = ObjectLocation::new(
            &self.intake_bucket,
            keys::intake_key(&request.client, keys::file_name(&request.filename)),
        );

        self.store.copy(&archived, &restored).await?;
        info!(from = %archived, to = %restored, "Restored archived version");

        if request.retry {
            self.enqueue(&restored).await?;
        }
        Ok(restored.key)
    }

    async fn enqueue(&self, location: &ObjectLocation) -> Result<(), ControlError> {
        let body = encode_notification(location)?;
        self.queue.enqueue(QueueMessage::new(body)).await?;
        info!(location = %location, "Enqueued routing notification");
        Ok(())
    }
}
