//! `docroute upload`: Put a local file into intake.

use docroute_core::location::ObjectLocation;
use docroute_core::storage::ObjectStore;
use std::path::Path;

use super::{CmdResult, Runtime};

pub async fn run(config_path: Option<&Path>, client: &str, file: &Path, route: bool) -> CmdResult {
    if client.is_empty() || client.contains('/') {
        return Err(format!("Invalid client '{client}'").into());
    }
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| format!("Not a file: {}", file.display()))?;

    let runtime = Runtime::new(super::load_config(config_path)?);
    let body = tokio::fs::read(file).await?;
    let size = body.len();

    let location = ObjectLocation::new(
        &runtime.config.storage.intake_bucket,
        format!("uploads/{client}/{filename}"),
    );
    runtime.store.put(&location, body).await?;
    println!("⬆️  Uploaded {} ({size} bytes) to {location}", file.display());

    if route {
        let outcome = runtime.engine().route(&location.bucket, &location.key).await?;
        println!("{}", super::describe(&outcome));
    }

    Ok(())
}
