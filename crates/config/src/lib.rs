//! Configuration loading, validation, and management for docroute.
//!
//! Loads configuration from `~/.docroute/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.docroute/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Object storage and bucket layout
    #[serde(default)]
    pub storage: StorageConfig,

    /// Routing audit log
    #[serde(default)]
    pub audit: AuditConfig,

    /// Delivery worker (concurrency and retry policy)
    #[serde(default)]
    pub worker: WorkerConfig,

    /// Control-plane HTTP server
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "fs" or "memory"
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// Root directory of the filesystem backend; one subdirectory per bucket
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,

    /// Bucket that receives raw uploads under `uploads/<client>/`
    #[serde(default = "default_intake_bucket")]
    pub intake_bucket: String,

    /// Bucket holding the current slot of every client document type
    #[serde(default = "default_processed_bucket")]
    pub processed_bucket: String,

    /// Bucket holding date-stamped archived versions
    #[serde(default = "default_archive_bucket")]
    pub archive_bucket: String,
}

fn default_storage_backend() -> String {
    "fs".into()
}
fn default_storage_root() -> PathBuf {
    AppConfig::config_dir().join("objects")
}
fn default_intake_bucket() -> String {
    "intake".into()
}
fn default_processed_bucket() -> String {
    "processed".into()
}
fn default_archive_bucket() -> String {
    "archive".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            root: default_storage_root(),
            intake_bucket: default_intake_bucket(),
            processed_bucket: default_processed_bucket(),
            archive_bucket: default_archive_bucket(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// "jsonl", "memory", or "none"
    #[serde(default = "default_audit_backend")]
    pub backend: String,

    #[serde(default = "default_audit_path")]
    pub path: PathBuf,
}

fn default_audit_backend() -> String {
    "jsonl".into()
}
fn default_audit_path() -> PathBuf {
    AppConfig::config_dir().join("audit").join("routing-log.jsonl")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            backend: default_audit_backend(),
            path: default_audit_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Maximum queue messages processed at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Deliveries before a record is dead-lettered
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// How often `serve` scans the intake bucket for new uploads; 0 disables the scan
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_concurrency() -> usize {
    8
}
fn default_max_attempts() -> u32 {
    5
}
fn default_base_backoff_ms() -> u64 {
    500
}
fn default_max_backoff_ms() -> u64 {
    30_000
}
fn default_queue_capacity() -> usize {
    1024
}
fn default_poll_interval_ms() -> u64 {
    2000
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            queue_capacity: default_queue_capacity(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    42618
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.docroute/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `INTAKE_BUCKET`, `PROCESSED_BUCKET`, `ARCHIVE_BUCKET`
    /// - `DOCROUTE_STORAGE_ROOT`
    /// - `DOCROUTE_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in `load`).
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(bucket) = var("INTAKE_BUCKET") {
            self.storage.intake_bucket = bucket;
        }
        if let Some(bucket) = var("PROCESSED_BUCKET") {
            self.storage.processed_bucket = bucket;
        }
        if let Some(bucket) = var("ARCHIVE_BUCKET") {
            self.storage.archive_bucket = bucket;
        }
        if let Some(root) = var("DOCROUTE_STORAGE_ROOT") {
            self.storage.root = PathBuf::from(root);
        }
        if let Some(port) = var("DOCROUTE_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("DOCROUTE_PORT is not a port number: {port}"))
            })?;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".docroute")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let storage = &self.storage;
        for (name, bucket) in [
            ("intake_bucket", &storage.intake_bucket),
            ("processed_bucket", &storage.processed_bucket),
            ("archive_bucket", &storage.archive_bucket),
        ] {
            if bucket.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("storage.{name} must not be empty")));
            }
        }

        if storage.processed_bucket == storage.intake_bucket {
            return Err(ConfigError::ValidationError(
                "storage.processed_bucket must differ from storage.intake_bucket".into(),
            ));
        }

        if !matches!(storage.backend.as_str(), "fs" | "memory") {
            return Err(ConfigError::ValidationError(format!(
                "unknown storage backend '{}' (expected fs or memory)",
                storage.backend
            )));
        }

        if !matches!(self.audit.backend.as_str(), "jsonl" | "memory" | "none") {
            return Err(ConfigError::ValidationError(format!(
                "unknown audit backend '{}' (expected jsonl, memory or none)",
                self.audit.backend
            )));
        }

        if self.worker.max_attempts == 0 {
            return Err(ConfigError::ValidationError("worker.max_attempts must be >= 1".into()));
        }

        if self.worker.concurrency == 0 {
            return Err(ConfigError::ValidationError("worker.concurrency must be >= 1".into()));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
