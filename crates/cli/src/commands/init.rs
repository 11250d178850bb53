//! `docroute init`: First-time setup.

use docroute_config::AppConfig;
use std::path::Path;

use super::CmdResult;

pub async fn run(config_path: Option<&Path>) -> CmdResult {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"));

    println!("📁 docroute - Setup");
    println!("===================\n");

    if let Some(dir) = config_path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        std::fs::create_dir_all(dir)?;
        println!("✅ Created config directory: {}", dir.display());
    }

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
    }

    let config = super::load_config(Some(&config_path))?;

    if config.storage.backend == "fs" {
        for bucket in [
            &config.storage.intake_bucket,
            &config.storage.processed_bucket,
            &config.storage.archive_bucket,
        ] {
            let dir = config.storage.root.join(bucket);
            std::fs::create_dir_all(&dir)?;
            println!("✅ Bucket directory: {}", dir.display());
        }
    }

    if config.audit.backend == "jsonl"
        && let Some(dir) = config.audit.path.parent()
    {
        std::fs::create_dir_all(dir)?;
        println!("✅ Audit log: {}", config.audit.path.display());
    }

    println!("\n📝 Next steps:");
    println!("   1. docroute upload <client> <file> --route");
    println!("   2. docroute serve   (worker + HTTP control surface)\n");

    Ok(())
}
