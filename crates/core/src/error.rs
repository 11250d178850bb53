//! Error types for the docroute domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each capability (storage, audit, queue) has its own error type so the
//! routing engine can tell a missing object apart from a backend outage.

use thiserror::Error;

/// The top-level error type for docroute operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // --- Audit log errors ---
    #[error("Audit log error: {0}")]
    Audit(#[from] AuditError),

    // --- Queue errors ---
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Capability errors ---

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The referenced object does not exist.
    #[error("Object not found: {location}")]
    NotFound { location: String },

    /// The key cannot be represented by this backend (e.g. escapes the root).
    #[error("Invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Any other backend failure (I/O, network, throttling).
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("Failed to append log entry: {0}")]
    Write(String),

    #[error("Log query failed: {0}")]
    Query(String),
}

#[derive(Debug, Clone, Error)]
pub enum QueueError {
    #[error("Queue is closed")]
    Closed,

    #[error("Failed to encode queue message: {0}")]
    Encode(String),

    #[error("Malformed queue message: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_displays_location() {
        let err = Error::Storage(StorageError::NotFound {
            location: "s3://intake/uploads/acme/a.csv".into(),
        });
        assert!(err.to_string().contains("s3://intake/uploads/acme/a.csv"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn not_found_is_distinguished_from_backend_failure() {
        assert!(StorageError::NotFound { location: "x".into() }.is_not_found());
        assert!(!StorageError::Backend("throttled".into()).is_not_found());
    }

    #[test]
    fn queue_error_converts_into_top_level() {
        let err: Error = QueueError::Closed.into();
        assert!(matches!(err, Error::Queue(QueueError::Closed)));
    }
}
