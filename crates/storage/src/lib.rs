//! Storage backends for docroute.
//!
//! - Object stores: [`InMemoryObjectStore`], [`FsObjectStore`]
//! - Audit logs: [`InMemoryAuditLog`], [`JsonlAuditLog`], [`NoopAuditLog`]
//! - Queue: [`MemoryQueue`]

pub mod memory_store;
pub mod fs_store;
pub mod memory_log;
pub mod jsonl_log;
pub mod noop;
pub mod queue;
pub mod factory;

pub use memory_store::InMemoryObjectStore;
pub use fs_store::FsObjectStore;
pub use memory_log::InMemoryAuditLog;
pub use jsonl_log::JsonlAuditLog;
pub use noop::NoopAuditLog;
pub use queue::MemoryQueue;
pub use factory::{build_audit_log, build_object_store};
