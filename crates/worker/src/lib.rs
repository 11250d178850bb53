//! Delivery worker: turns queue messages into routing runs.
//!
//! The [`Dispatcher`] drains the intake queue, decodes each notification
//! body, and routes its records concurrently. Records that fail are redriven
//! as single-record messages after an exponential backoff; once a record has
//! used up its attempts, or when a body cannot be decoded at all, it lands
//! on the dead-letter list.
//!
//! The [`IntakeWatcher`] is the local notification source: it polls the
//! intake bucket and enqueues a notification per new upload.

pub mod dispatcher;
pub mod retry;
pub mod watcher;

pub use dispatcher::{DeadLetter, DeliveryReport, Dispatcher};
pub use retry::RetryPolicy;
pub use watcher::IntakeWatcher;
