//! Document types and client document slots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The document-type tag a file is routed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocType {
    #[serde(rename = "daily-activity")]
    DailyActivity,
    #[serde(rename = "daily-balance")]
    DailyBalance,
}

impl DocType {
    pub const ALL: [DocType; 2] = [DocType::DailyActivity, DocType::DailyBalance];

    /// The tag as it appears in storage keys and log entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::DailyActivity => "daily-activity",
            DocType::DailyBalance => "daily-balance",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown document type '{s}'"))
    }
}

/// Identifies a client document slot: the pair that owns one "current" object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub client: String,
    pub doc_type: DocType,
}

impl SlotKey {
    pub fn new(client: impl Into<String>, doc_type: DocType) -> Self {
        Self {
            client: client.into(),
            doc_type,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.client, self.doc_type)
    }
}
