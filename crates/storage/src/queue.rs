//! In-process intake queue backed by a bounded `tokio::sync::mpsc` channel.
//!
//! The sending half implements [`EventQueue`]; the receiving half is handed
//! to the delivery worker.

use async_trait::async_trait;
use docroute_core::error::QueueError;
use docroute_core::queue::{EventQueue, QueueMessage};
use tokio::sync::mpsc;
use tracing::debug;

/// Producer side of the in-process queue. Cheap to clone.
#[derive(Clone)]
pub struct MemoryQueue {
    sender: mpsc::Sender<QueueMessage>,
}

impl MemoryQueue {
    /// Create a queue holding at most `capacity` undelivered messages.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<QueueMessage>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl EventQueue for MemoryQueue {
    async fn enqueue(&self, message: QueueMessage) -> Result<(), QueueError> {
        debug!(message_id = %message.id, receive_count = message.receive_count, "Enqueue");
        self.sender
            .send(message)
            .await
            .map_err(|_| QueueError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enqueue_and_receive_in_order() {
        let (queue, mut rx) = MemoryQueue::new(4);
        queue.enqueue(QueueMessage::new("first")).await.unwrap();
        queue.enqueue(QueueMessage::new("second")).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().body, "first");
        assert_eq!(rx.recv().await.unwrap().body, "second");
    }

    #[tokio::test]
    async fn enqueue_after_receiver_dropped_is_closed() {
        let (queue, rx) = MemoryQueue::new(4);
        drop(rx);
        let err = queue.enqueue(QueueMessage::new("lost")).await.unwrap_err();
        assert!(matches!(err, QueueError::Closed));
    }
}
