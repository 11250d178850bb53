//! `docroute serve`: Worker, intake watcher, and HTTP control surface.

use docroute_core::queue::EventQueue;
use docroute_storage::MemoryQueue;
use docroute_worker::{Dispatcher, IntakeWatcher, RetryPolicy};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{CmdResult, Runtime};

pub async fn run(config_path: Option<&Path>, port_override: Option<u16>) -> CmdResult {
    let mut config = super::load_config(config_path)?;
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("📁 docroute - Serving");
    println!("   Gateway:    {}:{}", config.gateway.host, config.gateway.port);
    println!("   Intake:     {}", config.storage.intake_bucket);
    println!("   Processed:  {}", config.storage.processed_bucket);
    println!("   Archive:    {}", config.storage.archive_bucket);
    println!("   Workers:    {}", config.worker.concurrency);

    let runtime = Runtime::new(config);
    let worker = runtime.config.worker.clone();

    let (queue, receiver) = MemoryQueue::new(worker.queue_capacity);
    let queue: Arc<dyn EventQueue> = Arc::new(queue);

    let dispatcher = Arc::new(
        Dispatcher::new(Arc::new(runtime.engine()), queue.clone(), RetryPolicy::from_config(&worker))
            .with_concurrency(worker.concurrency),
    );
    let _dispatcher_handle = dispatcher.start(receiver);

    if worker.poll_interval_ms > 0 {
        let watcher = Arc::new(IntakeWatcher::new(
            runtime.store.clone(),
            queue.clone(),
            &runtime.config.storage.intake_bucket,
            Duration::from_millis(worker.poll_interval_ms),
        ));
        let _watcher_handle = watcher.start();
    } else {
        info!("Intake scanning disabled; only retry and force-route feed the queue");
    }

    let control = Arc::new(runtime.control(queue));

    // Start gateway (this blocks)
    docroute_gateway::start(&runtime.config.gateway, control).await?;

    Ok(())
}
