//! # docroute core
//!
//! Domain types, capability traits, and error definitions for the docroute
//! document router. This crate has **zero framework dependencies**: it defines
//! the domain model that the storage backends, the routing engine, and the
//! delivery worker implement against.
//!
//! ## Capabilities
//!
//! The routing engine never talks to a concrete store. Every side effect goes
//! through one of three traits defined here:
//! - [`ObjectStore`]: copy, delete, list, and existence checks on buckets
//! - [`AuditLog`]: append-only routing status log
//! - [`EventQueue`]: at-least-once delivery of intake notifications

pub mod error;
pub mod location;
pub mod document;
pub mod event;
pub mod storage;
pub mod audit;
pub mod queue;

// Re-export key types at crate root for ergonomics
pub use error::{AuditError, Error, QueueError, Result, StorageError};
pub use location::ObjectLocation;
pub use document::{DocType, SlotKey};
pub use event::{IntakeEvent, decode_notification, encode_notification};
pub use storage::ObjectStore;
pub use audit::{AuditLog, LogEntry, LogFilter, RouteStatus};
pub use queue::{EventQueue, QueueMessage};
