//! Build backends from configuration.

use docroute_config::AppConfig;
use docroute_core::audit::AuditLog;
use docroute_core::storage::ObjectStore;
use std::sync::Arc;
use tracing::info;

use crate::{FsObjectStore, InMemoryAuditLog, InMemoryObjectStore, JsonlAuditLog, NoopAuditLog};

/// The object store selected by `storage.backend`.
pub fn build_object_store(config: &AppConfig) -> Arc<dyn ObjectStore> {
    let store: Arc<dyn ObjectStore> = match config.storage.backend.as_str() {
        "memory" => Arc::new(InMemoryObjectStore::new()),
        _ => Arc::new(FsObjectStore::new(config.storage.root.clone())),
    };
    info!(backend = store.name(), "Object store ready");
    store
}

/// The audit log selected by `audit.backend`.
pub fn build_audit_log(config: &AppConfig) -> Arc<dyn AuditLog> {
    let log: Arc<dyn AuditLog> = match config.audit.backend.as_str() {
        "memory" => Arc::new(InMemoryAuditLog::new()),
        "none" => Arc::new(NoopAuditLog),
        _ => Arc::new(JsonlAuditLog::new(config.audit.path.clone())),
    };
    info!(backend = log.name(), "Audit log ready");
    log
}
