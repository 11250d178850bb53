pub mod init;
pub mod logs;
pub mod restore;
pub mod route;
pub mod serve;
pub mod status;
pub mod upload;

use docroute_config::AppConfig;
use docroute_core::audit::AuditLog;
use docroute_core::queue::EventQueue;
use docroute_core::storage::ObjectStore;
use docroute_router::{Buckets, ControlPlane, RouteOutcome, RoutingEngine};
use docroute_storage::{MemoryQueue, build_audit_log, build_object_store};
use std::path::Path;
use std::sync::Arc;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Load config from `path`, or from the default location with env overrides.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    config.map_err(|e| format!("Failed to load config: {e}").into())
}

/// Backends built from config, shared by every command.
pub struct Runtime {
    pub config: AppConfig,
    pub store: Arc<dyn ObjectStore>,
    pub audit: Arc<dyn AuditLog>,
}

impl Runtime {
    pub fn new(config: AppConfig) -> Self {
        let store = build_object_store(&config);
        let audit = build_audit_log(&config);
        Self { config, store, audit }
    }

    pub fn engine(&self) -> RoutingEngine {
        RoutingEngine::new(
            self.store.clone(),
            self.audit.clone(),
            Buckets::from_config(&self.config.storage),
        )
    }

    pub fn control(&self, queue: Arc<dyn EventQueue>) -> ControlPlane {
        ControlPlane::new(self.store.clone(), self.audit.clone(), queue, &self.config.storage)
    }

    /// A control plane for one-shot commands. Nothing consumes its queue, so
    /// callers route directly instead of enqueueing.
    pub fn offline_control(&self) -> ControlPlane {
        let (queue, _receiver) = MemoryQueue::new(1);
        self.control(Arc::new(queue))
    }
}

pub fn describe(outcome: &RouteOutcome) -> String {
    match outcome {
        RouteOutcome::Skipped { key } => format!("⏭️  Skipped {key} (not an uploads/<client>/<file> key)"),
        RouteOutcome::Promoted { dest, archived: None } => format!("✅ Promoted to {dest}"),
        RouteOutcome::Promoted {
            dest,
            archived: Some(archived),
        } => format!("✅ Promoted to {dest}\n   Archived previous version to {archived}"),
        RouteOutcome::AlreadyRouted { dest } => format!("✅ Already routed to {dest}"),
    }
}
