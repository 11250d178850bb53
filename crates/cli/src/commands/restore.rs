//! `docroute restore`: Copy an archived version back into intake.

use docroute_router::RestoreRequest;
use std::path::Path;

use super::{CmdResult, Runtime};

pub async fn run(
    config_path: Option<&Path>,
    client: String,
    doc_type: String,
    date: String,
    filename: String,
    route: bool,
) -> CmdResult {
    let runtime = Runtime::new(super::load_config(config_path)?);

    // Nothing drains the offline queue, so routing happens inline below.
    let request = RestoreRequest {
        client,
        doc_type,
        date,
        filename,
        retry: false,
    };
    let restored_key = runtime.offline_control().restore(&request).await?;
    println!(
        "♻️  Restored {}/{} ({}) to {}/{restored_key}",
        request.client, request.filename, request.date, runtime.config.storage.intake_bucket
    );

    if route {
        let outcome = runtime
            .engine()
            .route(&runtime.config.storage.intake_bucket, &restored_key)
            .await?;
        println!("{}", super::describe(&outcome));
    }

    Ok(())
}
