//! `docroute logs`: List audit log entries.

use docroute_core::audit::RouteStatus;
use std::path::Path;

use super::{CmdResult, Runtime};

pub async fn run(
    config_path: Option<&Path>,
    client: Option<String>,
    status: Option<String>,
    json: bool,
) -> CmdResult {
    let status = status.as_deref().map(str::parse::<RouteStatus>).transpose()?;
    if client.is_none() && status.is_none() {
        println!("Pass --client <id> or --status <STATUS> to select entries.");
        return Ok(());
    }

    let runtime = Runtime::new(super::load_config(config_path)?);
    let entries = runtime.offline_control().list_logs(client.as_deref(), status).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No matching log entries.");
        return Ok(());
    }

    for entry in &entries {
        let detail = entry
            .error
            .as_deref()
            .map(|e| format!("error: {e}"))
            .or_else(|| entry.dest.as_ref().map(|d| format!("→ {d}")))
            .unwrap_or_default();
        println!(
            "{}  {:<10} {}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.status.as_str(),
            entry.pk,
            detail
        );
        if let Some(note) = &entry.note {
            println!("{:31}note: {note}", "");
        }
    }
    println!("\n{} entries", entries.len());

    Ok(())
}
