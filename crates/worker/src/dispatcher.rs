//! Queue consumer with bounded concurrency, redrive, and dead-lettering.

use chrono::{DateTime, Utc};
use docroute_core::event::{IntakeEvent, decode_notification, encode_notification};
use docroute_core::queue::{EventQueue, QueueMessage};
use docroute_router::{RouteOutcome, RoutingEngine};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore, mpsc};
use tracing::{debug, error, info, warn};

use crate::retry::RetryPolicy;

/// A payload the worker gave up on.
#[derive(Debug, Clone, Serialize)]
pub struct DeadLetter {
    pub message_id: String,
    pub body: String,
    pub receive_count: u32,
    pub reason: String,
    pub failed_at: DateTime<Utc>,
}

/// What happened to the records of one message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    /// Promoted, or found already promoted
    pub routed: usize,
    /// Not intake keys
    pub skipped: usize,
    /// Failed and scheduled for another delivery
    pub redriven: usize,
    pub dead_lettered: usize,
}

impl DeliveryReport {
    pub fn failed(&self) -> usize {
        self.redriven + self.dead_lettered
    }
}

pub struct Dispatcher {
    engine: Arc<RoutingEngine>,
    queue: Arc<dyn EventQueue>,
    policy: RetryPolicy,
    concurrency: usize,
    dead_letters: Arc<RwLock<Vec<DeadLetter>>>,
}

impl Dispatcher {
    /// `queue` receives redriven records; normally the queue this dispatcher drains.
    pub fn new(engine: Arc<RoutingEngine>, queue: Arc<dyn EventQueue>, policy: RetryPolicy) -> Self {
        Self {
            engine,
            queue,
            policy,
            concurrency: 8,
            dead_letters: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn dead_letters(&self) -> Vec<DeadLetter> {
        self.dead_letters.read().await.clone()
    }

    /// Deliver one message: route every record, then redrive or dead-letter failures.
    pub async fn handle(&self, message: QueueMessage) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        let events = match decode_notification(&message.body) {
            Ok(events) => events,
            Err(e) => {
                self.dead_letter(&message, &message.body, e.to_string()).await;
                report.dead_lettered += 1;
                return report;
            }
        };
        if events.is_empty() {
            debug!(message_id = %message.id, "No object-store records in message");
            return report;
        }

        let results = join_all(events.iter().map(|event| self.engine.route_event(event))).await;

        for (event, result) in events.iter().zip(results) {
            match result {
                Ok(RouteOutcome::Skipped { .. }) => report.skipped += 1,
                Ok(_) => report.routed += 1,
                Err(e) => {
                    if self.redrive(&message, event, &e.to_string()).await {
                        report.redriven += 1;
                    } else {
                        report.dead_lettered += 1;
                    }
                }
            }
        }

        report
    }

    /// Schedule a single-record redelivery; returns `false` if the record was dead-lettered instead.
    async fn redrive(&self, message: &QueueMessage, event: &IntakeEvent, reason: &str) -> bool {
        let body = match encode_notification(&event.source) {
            Ok(body) => body,
            Err(e) => {
                self.dead_letter(message, &message.body, e.to_string()).await;
                return false;
            }
        };

        if !self.policy.should_redrive(message.receive_count) {
            self.dead_letter(message, &body, reason.to_string()).await;
            return false;
        }

        let next = message.redelivery(body);
        let delay = self.policy.delay_for(message.receive_count);
        warn!(
            src = %event.source,
            receive_count = message.receive_count,
            delay_ms = delay.as_millis() as u64,
            error = reason,
            "Routing failed, redriving"
        );

        let queue = self.queue.clone();
        let dead_letters = self.dead_letters.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = queue.enqueue(next.clone()).await {
                error!(message_id = %next.id, error = %e, "Redrive enqueue failed; dead-lettering");
                dead_letters.write().await.push(DeadLetter {
                    message_id: next.id,
                    body: next.body,
                    receive_count: next.receive_count,
                    reason: format!("redrive failed: {e}"),
                    failed_at: Utc::now(),
                });
            }
        });
        true
    }

    async fn dead_letter(&self, message: &QueueMessage, body: &str, reason: String) {
        error!(
            message_id = %message.id,
            receive_count = message.receive_count,
            reason = %reason,
            "Dead-lettering message"
        );
        self.dead_letters.write().await.push(DeadLetter {
            message_id: message.id.clone(),
            body: body.to_string(),
            receive_count: message.receive_count,
            reason,
            failed_at: Utc::now(),
        });
    }

    /// Drain `receiver` in the background, at most `concurrency` messages at a time.
    pub fn start(self: Arc<Self>, mut receiver: mpsc::Receiver<QueueMessage>) -> tokio::task::JoinHandle<()> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        info!(concurrency = self.concurrency, max_attempts = self.policy.max_attempts, "Dispatcher started");

        tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                let Ok(permit) = permits.clone().acquire_owned().await else {
                    break;
                };
                let this = self.clone();
                tokio::spawn(async move {
                    let _permit = permit;
                    let id = message.id.clone();
                    let report = this.handle(message).await;
                    debug!(message_id = %id, ?report, "Message delivered");
                });
            }
            debug!("Queue closed, stopping dispatcher");
        })
    }
}
