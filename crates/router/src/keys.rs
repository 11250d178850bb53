//! Canonical storage key layout.
//!
//! ```text
//! intake:   uploads/<client>/<filename>
//! current:  clients/<client>/<doc_type>/current/<filename>
//! archive:  clients/<client>/<doc_type>/<YYYY-MM-DD>/<filename>
//! ```

use chrono::NaiveDate;
use docroute_core::DocType;

const INTAKE_ROOT: &str = "uploads";

/// A parsed intake key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeKey<'a> {
    pub client: &'a str,
    /// Everything after the client segment; may itself contain `/`
    pub filename: &'a str,
}

/// Parse `uploads/<client>/<filename>`. Both segments must be non-empty.
pub fn parse_intake_key(key: &str) -> Option<IntakeKey<'_>> {
    let mut parts = key.splitn(3, '/');
    let root = parts.next()?;
    let client = parts.next()?;
    let filename = parts.next()?;
    if root != INTAKE_ROOT || client.is_empty() || filename.is_empty() {
        return None;
    }
    Some(IntakeKey { client, filename })
}

pub fn current_prefix(client: &str, doc_type: DocType) -> String {
    format!("clients/{client}/{doc_type}/current/")
}

pub fn current_key(client: &str, doc_type: DocType, filename: &str) -> String {
    format!("{}{filename}", current_prefix(client, doc_type))
}

pub fn archive_key(client: &str, doc_type: DocType, date: NaiveDate, filename: &str) -> String {
    format!("clients/{client}/{doc_type}/{}/{filename}", format_date(date))
}

pub fn intake_key(client: &str, filename: &str) -> String {
    format!("{INTAKE_ROOT}/{client}/{filename}")
}

/// `YYYY-MM-DD`, the date format of archive keys and log sort keys.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Last `/`-segment of a key.
pub fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
