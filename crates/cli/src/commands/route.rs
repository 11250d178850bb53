//! `docroute route`: Route one object now.

use std::path::Path;

use super::{CmdResult, Runtime};

pub async fn run(config_path: Option<&Path>, key: &str, bucket: Option<String>) -> CmdResult {
    let runtime = Runtime::new(super::load_config(config_path)?);
    let bucket = bucket.unwrap_or_else(|| runtime.config.storage.intake_bucket.clone());

    let outcome = runtime.engine().route(&bucket, key).await?;
    println!("{}", super::describe(&outcome));

    Ok(())
}
