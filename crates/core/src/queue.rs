//! Event queue capability: at-least-once delivery of notification bodies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QueueError;

/// A message on the intake queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub id: String,

    /// Notification body (see [`crate::event`])
    pub body: String,

    /// How many times this payload has been delivered, starting at 1
    pub receive_count: u32,
}

impl QueueMessage {
    /// A fresh message on its first delivery.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            body: body.into(),
            receive_count: 1,
        }
    }

    /// The same payload queued for its next delivery.
    pub fn redelivery(&self, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            body: body.into(),
            receive_count: self.receive_count + 1,
        }
    }
}

/// The core EventQueue trait.
#[async_trait]
pub trait EventQueue: Send + Sync {
    /// Enqueue a message for delivery.
    async fn enqueue(&self, message: QueueMessage) -> Result<(), QueueError>;
}
