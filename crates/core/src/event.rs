//! Intake events and the object-created notification envelope.
//!
//! Queue message bodies carry the storage notification format:
//!
//! ```json
//! {"Records":[{"eventSource":"aws:s3",
//!              "s3":{"bucket":{"name":"intake"},"object":{"key":"uploads/acme/a.csv"}}}]}
//! ```
//!
//! Object keys inside notifications are percent-encoded. Only `%XX` escapes
//! are decoded; a literal `+` stays a `+`. Escapes that do not form valid
//! UTF-8 decode to U+FFFD rather than rejecting the record.

use serde::{Deserialize, Serialize};

use crate::error::QueueError;
use crate::location::ObjectLocation;

/// The `eventSource` value of object-store notifications.
pub const OBJECT_EVENT_SOURCE: &str = "aws:s3";

/// One object-creation event to be routed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeEvent {
    pub source: ObjectLocation,
}

impl IntakeEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            source: ObjectLocation::new(bucket, key),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Notification {
    #[serde(rename = "Records", default)]
    records: Vec<NotificationRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NotificationRecord {
    #[serde(rename = "eventSource", default, skip_serializing_if = "Option::is_none")]
    event_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s3: Option<ObjectEntity>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ObjectEntity {
    bucket: BucketRef,
    object: ObjectRef,
}

#[derive(Debug, Serialize, Deserialize)]
struct BucketRef {
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ObjectRef {
    key: String,
}

/// Decode a queue message body into intake events.
///
/// Records from other event sources are ignored. A body that is not a
/// notification at all, or an object record without bucket/key, is
/// `QueueError::Malformed`.
pub fn decode_notification(body: &str) -> Result<Vec<IntakeEvent>, QueueError> {
    let notification: Notification =
        serde_json::from_str(body).map_err(|e| QueueError::Malformed(e.to_string()))?;

    let mut events = Vec::with_capacity(notification.records.len());
    for record in notification.records {
        if record.event_source.as_deref() != Some(OBJECT_EVENT_SOURCE) {
            continue;
        }
        let entity = record.s3.ok_or_else(|| {
            QueueError::Malformed("object record without an s3 entity".into())
        })?;
        let bytes = urlencoding::decode_binary(entity.object.key.as_bytes());
        let key = String::from_utf8_lossy(&bytes).into_owned();
        events.push(IntakeEvent::new(entity.bucket.name, key));
    }
    Ok(events)
}

/// Encode a single-record notification for `location`, as used by retries,
/// restores, and redrives.
pub fn encode_notification(location: &ObjectLocation) -> Result<String, QueueError> {
    let notification = Notification {
        records: vec![NotificationRecord {
            event_source: Some(OBJECT_EVENT_SOURCE.into()),
            s3: Some(ObjectEntity {
                bucket: BucketRef {
                    name: location.bucket.clone(),
                },
                object: ObjectRef {
                    key: urlencoding::encode(&location.key).into_owned(),
                },
            }),
        }],
    };
    serde_json::to_string(&notification).map_err(|e| QueueError::Encode(e.to_string()))
}
