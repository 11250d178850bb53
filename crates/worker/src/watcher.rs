//! Polling notification source for the intake bucket.
//!
//! Announces each `uploads/` key once by enqueueing a notification for it.
//! A key is forgotten when it leaves intake, so a later re-upload under the
//! same key is announced again.

use docroute_core::error::QueueError;
use docroute_core::event::encode_notification;
use docroute_core::location::ObjectLocation;
use docroute_core::queue::{EventQueue, QueueMessage};
use docroute_core::storage::ObjectStore;
use docroute_core::Error;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const INTAKE_PREFIX: &str = "uploads/";

pub struct IntakeWatcher {
    store: Arc<dyn ObjectStore>,
    queue: Arc<dyn EventQueue>,
    bucket: String,
    interval: Duration,
    announced: Mutex<HashSet<String>>,
}

impl IntakeWatcher {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        queue: Arc<dyn EventQueue>,
        bucket: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            queue,
            bucket: bucket.into(),
            interval,
            announced: Mutex::new(HashSet::new()),
        }
    }

    /// List intake once and enqueue every key not yet announced. Returns how many were enqueued.
    pub async fn scan(&self) -> Result<usize, Error> {
        let present: HashSet<String> = self.store.list(&self.bucket, INTAKE_PREFIX).await?.into_iter().collect();

        let mut announced = self.announced.lock().await;
        announced.retain(|key| present.contains(key));

        let mut fresh: Vec<&String> = present.iter().filter(|key| !announced.contains(*key)).collect();
        fresh.sort();

        for key in &fresh {
            let body = encode_notification(&ObjectLocation::new(&self.bucket, key.as_str()))?;
            self.queue.enqueue(QueueMessage::new(body)).await?;
            announced.insert((*key).clone());
            debug!(bucket = %self.bucket, key = %key, "Announced intake object");
        }

        Ok(fresh.len())
    }

    /// Scan on a fixed interval until the queue closes.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(bucket = %self.bucket, interval_ms = self.interval.as_millis() as u64, "Intake watcher started");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            loop {
                interval.tick().await;
                match self.scan().await {
                    Ok(0) => {}
                    Ok(count) => info!(count, "New uploads queued"),
                    Err(Error::Queue(QueueError::Closed)) => {
                        debug!("Queue closed, stopping intake watcher");
                        return;
                    }
                    Err(e) => warn!(error = %e, "Intake scan failed"),
                }
            }
        })
    }
}
