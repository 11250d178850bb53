//! docroute CLI: the main entry point.
//!
//! Commands:
//! - `init`: Write a default config and create storage directories
//! - `serve`: Run the worker, intake watcher, and HTTP control surface
//! - `route`: Route one intake object now
//! - `upload`: Put a local file into intake (optionally routing it)
//! - `logs`: List audit log entries by client or status
//! - `restore`: Copy an archived version back into intake
//! - `status`: Show configuration and bucket contents

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "docroute",
    about = "docroute - client document routing and archival",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.docroute/config.toml)
    #[arg(short, long, global = true, env = "DOCROUTE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and create storage directories
    Init,

    /// Run the delivery worker and the HTTP control surface
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Route one object from the intake bucket
    Route {
        /// Object key, e.g. uploads/acme/activity-2024.csv
        key: String,

        /// Source bucket (defaults to the intake bucket)
        #[arg(short, long)]
        bucket: Option<String>,
    },

    /// Upload a local file to uploads/<client>/<filename>
    Upload {
        /// Client identifier
        client: String,

        /// File to upload
        file: PathBuf,

        /// Route the object immediately after uploading
        #[arg(long)]
        route: bool,
    },

    /// List audit log entries (newest first)
    Logs {
        #[arg(long, conflicts_with = "status")]
        client: Option<String>,

        /// RECEIVED, ARCHIVING, PROCESSED or FAILED
        #[arg(long)]
        status: Option<String>,

        /// Print entries as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Copy an archived version back into intake
    Restore {
        client: String,

        /// daily-activity or daily-balance
        doc_type: String,

        /// Archive date, YYYY-MM-DD
        date: String,

        filename: String,

        /// Route the restored object immediately
        #[arg(long)]
        route: bool,
    },

    /// Show configuration and bucket contents
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if cli.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(env_filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();
    }

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Init => commands::init::run(config).await?,
        Commands::Serve { port } => commands::serve::run(config, port).await?,
        Commands::Route { key, bucket } => commands::route::run(config, &key, bucket).await?,
        Commands::Upload { client, file, route } => commands::upload::run(config, &client, &file, route).await?,
        Commands::Logs { client, status, json } => commands::logs::run(config, client, status, json).await?,
        Commands::Restore {
            client,
            doc_type,
            date,
            filename,
            route,
        } => commands::restore::run(config, client, doc_type, date, filename, route).await?,
        Commands::Status => commands::status::run(config).await?,
    }

    Ok(())
}
