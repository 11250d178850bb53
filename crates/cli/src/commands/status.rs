//! `docroute status`: Show configuration and bucket contents.

use docroute_config::AppConfig;
use docroute_core::storage::ObjectStore;
use std::path::Path;

use super::{CmdResult, Runtime};

pub async fn run(config_path: Option<&Path>) -> CmdResult {
    let runtime = Runtime::new(super::load_config(config_path)?);
    let config = &runtime.config;

    println!("📁 docroute Status");
    println!("==================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Storage:      {} ({})", config.storage.backend, config.storage.root.display());
    println!("  Audit log:    {} ({})", config.audit.backend, config.audit.path.display());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "  Worker:       concurrency {}, {} attempts, backoff {}..{} ms",
        config.worker.concurrency,
        config.worker.max_attempts,
        config.worker.base_backoff_ms,
        config.worker.max_backoff_ms
    );

    println!();
    for (role, bucket, prefix) in [
        ("Pending uploads", &config.storage.intake_bucket, "uploads/"),
        ("Current documents", &config.storage.processed_bucket, "clients/"),
        ("Archived versions", &config.storage.archive_bucket, "clients/"),
    ] {
        match runtime.store.list(bucket, prefix).await {
            Ok(keys) => println!("  {role:<18} {:>6}  ({bucket})", keys.len()),
            Err(e) => println!("  {role:<18}  ⚠️  {e}"),
        }
    }

    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"));
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file - run `docroute init` first");
    }

    Ok(())
}
