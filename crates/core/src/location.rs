//! Object locations: a bucket plus a key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single object in a bucket.
///
/// Displays as the canonical `s3://<bucket>/<key>` URI, which is also the
/// partition key of every audit log entry about that object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The canonical `s3://bucket/key` form.
    pub fn uri(&self) -> String {
        self.to_string()
    }

    /// Last `/`-separated segment of the key.
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}
