//! # docroute router
//!
//! The routing/archival state machine. For every intake object it:
//!
//! 1. parses `uploads/<client>/<filename>` (anything else is skipped),
//! 2. classifies the filename into a [`DocType`](docroute_core::DocType),
//! 3. archives whatever occupies the slot's `current/` prefix under a dated key,
//! 4. promotes the new object into `current/`,
//!
//! and records each step in the audit log. The [`ControlPlane`] wraps the
//! operator actions (log listing, retry, restore, force-route) that feed new
//! events back into the queue.

pub mod classify;
pub mod keys;
pub mod mover;
pub mod slots;
pub mod engine;
pub mod control;

pub use classify::{Classification, classify, classify_detailed};
pub use engine::{Buckets, RouteError, RouteOutcome, RoutingEngine};
pub use mover::{MoveOutcome, move_object};
pub use slots::SlotLocks;
pub use control::{ControlError, ControlPlane, RestoreRequest};
