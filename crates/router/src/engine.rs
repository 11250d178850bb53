//! The routing engine: promotion and archival of one intake object.
//!
//! Per event the engine walks `RECEIVED → [ARCHIVING] → PROCESSED | FAILED`:
//!
//! - Keys outside `uploads/<client>/<filename>` are skipped without a log entry.
//! - Audit appends are best-effort; a failed append is logged and ignored.
//! - Storage failures are recorded as FAILED and returned, so the delivery
//!   layer can redrive the event.
//!
//! Redelivery of an event that already completed finds its source gone and
//! finishes as PROCESSED without moving anything. Completion is proven by the
//! destination still being current, by the object sitting in today's archive,
//! or by an earlier PROCESSED entry for the same source.

use chrono::{NaiveDate, Utc};
use docroute_config::StorageConfig;
use docroute_core::audit::{AuditLog, LogEntry, LogFilter, RouteStatus};
use docroute_core::error::StorageError;
use docroute_core::event::IntakeEvent;
use docroute_core::location::ObjectLocation;
use docroute_core::storage::ObjectStore;
use docroute_core::{DocType, SlotKey};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classify::classify_detailed;
use crate::keys;
use crate::mover::move_object;
use crate::slots::SlotLocks;

/// Buckets the engine writes to. The intake bucket comes from each event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    /// Holds `clients/<client>/<doc_type>/current/`
    pub processed: String,
    /// Holds `clients/<client>/<doc_type>/<date>/`
    pub archive: String,
}

impl Buckets {
    pub fn new(processed: impl Into<String>, archive: impl Into<String>) -> Self {
        Self {
            processed: processed.into(),
            archive: archive.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.processed_bucket, &config.archive_bucket)
    }
}

/// Successful end states of a routing invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The key is not an intake key; nothing was done or logged.
    Skipped { key: String },

    /// The object is now current; `archived` is where the prior occupant went.
    Promoted {
        dest: ObjectLocation,
        archived: Option<ObjectLocation>,
    },

    /// A previous delivery already promoted this object.
    AlreadyRouted { dest: ObjectLocation },
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Source object {location} is missing and was never promoted")]
    SourceMissing { location: String },
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Orchestrates classification, archival, promotion, and audit logging.
pub struct RoutingEngine {
    store: Arc<dyn ObjectStore>,
    audit: Arc<dyn AuditLog>,
    buckets: Buckets,
    slots: Arc<SlotLocks>,
    today: fn() -> NaiveDate,
}

impl RoutingEngine {
    pub fn new(store: Arc<dyn ObjectStore>, audit: Arc<dyn AuditLog>, buckets: Buckets) -> Self {
        Self {
            store,
            audit,
            buckets,
            slots: Arc::new(SlotLocks::new()),
            today: utc_today,
        }
    }

    /// Share slot locks with other engines in this process.
    pub fn with_slot_locks(mut self, slots: Arc<SlotLocks>) -> Self {
        self.slots = slots;
        self
    }

    /// Override the date source used for archive keys and log sort keys.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub async fn route_event(&self, event: &IntakeEvent) -> Result<RouteOutcome, RouteError> {
        self.route(&event.source.bucket, &event.source.key).await
    }

    /// Route one intake object into its client's current slot.
    pub async fn route(&self, source_bucket: &str, source_key: &str) -> Result<RouteOutcome, RouteError> {
        let Some(intake) = keys::parse_intake_key(source_key) else {
            info!(bucket = source_bucket, key = source_key, "Skipping non-upload key");
            return Ok(RouteOutcome::Skipped {
                key: source_key.to_string(),
            });
        };

        let source = ObjectLocation::new(source_bucket, source_key);
        let client = intake.client;
        let classification = classify_detailed(intake.filename);
        let doc_type = classification.doc_type;
        let date = (self.today)();
        let dest = ObjectLocation::new(
            &self.buckets.processed,
            keys::current_key(client, doc_type, intake.filename),
        );

        let mut received = LogEntry::new(&source, date, RouteStatus::Received).with_slot(client, doc_type);
        if !classification.matched {
            warn!(src = %source, doc_type = %doc_type, "No classification rule matched; using default type");
            received = received.with_note(format!("unclassified; defaulted to {doc_type}"));
        }
        self.record(received).await;

        match self.promote(&source, client, doc_type, &dest, date).await {
            Ok(outcome) => {
                self.record(
                    LogEntry::new(&source, date, RouteStatus::Processed)
                        .with_slot(client, doc_type)
                        .with_dest(&dest),
                )
                .await;
                Ok(outcome)
            }
            Err(e) => {
                warn!(src = %source, client, doc_type = %doc_type, error = %e, "Routing failed");
                self.record(
                    LogEntry::new(&source, date, RouteStatus::Failed)
                        .with_slot(client, doc_type)
                        .with_error(e.to_string()),
                )
                .await;
                Err(e)
            }
        }
    }

    /// Archive the slot's prior occupant (if any) and move `source` into `dest`.
    async fn promote(
        &self,
        source: &ObjectLocation,
        client: &str,
        doc_type: DocType,
        dest: &ObjectLocation,
        date: NaiveDate,
    ) -> Result<RouteOutcome, RouteError> {
        let _slot = self.slots.acquire(&SlotKey::new(client, doc_type)).await;
        let store = self.store.as_ref();

        if !store.exists(source).await? {
            if store.exists(dest).await? {
                info!(src = %source, dest = %dest, "Already routed by an earlier delivery");
                return Ok(RouteOutcome::AlreadyRouted { dest: dest.clone() });
            }
            if self.completed_earlier(source, client, doc_type, date).await? {
                info!(src = %source, dest = %dest, "Already routed and since superseded");
                return Ok(RouteOutcome::AlreadyRouted { dest: dest.clone() });
            }
            return Err(RouteError::SourceMissing {
                location: source.uri(),
            });
        }

        let prefix = keys::current_prefix(client, doc_type);
        let prior = store
            .list(&self.buckets.processed, &prefix)
            .await?
            .into_iter()
            .find(|key| *key != dest.key);

        let archived = match prior {
            Some(prior_key) => {
                let prior = ObjectLocation::new(&self.buckets.processed, prior_key);
                let archive = ObjectLocation::new(
                    &self.buckets.archive,
                    keys::archive_key(client, doc_type, date, keys::file_name(&prior.key)),
                );
                self.record(
                    LogEntry::new(source, date, RouteStatus::Archiving)
                        .with_slot(client, doc_type)
                        .with_dest(&archive)
                        .with_note(format!("prior {prior}")),
                )
                .await;
                move_object(store, &prior, &archive).await?;
                Some(archive)
            }
            None => {
                debug!(prefix = %prefix, "No prior current object to archive");
                None
            }
        };

        move_object(store, source, dest).await?;

        Ok(RouteOutcome::Promoted {
            dest: dest.clone(),
            archived,
        })
    }

    /// Whether an earlier delivery of `source` finished even though its
    /// promoted copy has since been archived by a newer upload.
    async fn completed_earlier(
        &self,
        source: &ObjectLocation,
        client: &str,
        doc_type: DocType,
        date: NaiveDate,
    ) -> Result<bool, StorageError> {
        let archived = ObjectLocation::new(
            &self.buckets.archive,
            keys::archive_key(client, doc_type, date, keys::file_name(&source.key)),
        );
        if self.store.exists(&archived).await? {
            return Ok(true);
        }

        let pk = source.uri();
        match self.audit.query(&LogFilter::Client(client.to_string())).await {
            Ok(entries) => Ok(entries
                .iter()
                .any(|e| e.pk == pk && e.status == RouteStatus::Processed)),
            Err(e) => {
                warn!(pk = %pk, error = %e, "Audit log query failed; treating source as never routed");
                Ok(false)
            }
        }
    }

    /// Best-effort audit append.
    async fn record(&self, entry: LogEntry) {
        let status = entry.status;
        let pk = entry.pk.clone();
        if let Err(e) = self.audit.append(entry).await {
            warn!(pk = %pk, status = %status, error = %e, "Audit log append failed; continuing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docroute_core::audit::LogFilter;
    use docroute_core::error::AuditError;
    use docroute_storage::{InMemoryAuditLog, InMemoryObjectStore};

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    fn loc(bucket: &str, key: &str) -> ObjectLocation {
        ObjectLocation::new(bucket, key)
    }

    /// Wraps the in-memory store and fails copies into one bucket on demand.
    struct FlakyStore {
        inner: InMemoryObjectStore,
        fail_copy_into: std::sync::Mutex<Option<String>>,
    }

    impl FlakyStore {
        fn new() -> Self {
            Self {
                inner: InMemoryObjectStore::new(),
                fail_copy_into: std::sync::Mutex::new(None),
            }
        }

        fn fail_copies_into(&self, bucket: &str) {
            *self.fail_copy_into.lock().unwrap() = Some(bucket.to_string());
        }
    }

    #[async_trait]
    impl ObjectStore for FlakyStore {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn put(&self, location: &ObjectLocation, body: Vec<u8>) -> Result<(), StorageError> {
            self.inner.put(location, body).await
        }

        async fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError> {
            self.inner.get(location).await
        }

        async fn copy(&self, src: &ObjectLocation, dst: &ObjectLocation) -> Result<(), StorageError> {
            let failing = self.fail_copy_into.lock().unwrap().clone();
            if failing.as_deref() == Some(dst.bucket.as_str()) {
                return Err(StorageError::Backend("copy throttled: SlowDown".into()));
            }
            self.inner.copy(src, dst).await
        }

        async fn delete(&self, location: &ObjectLocation) -> Result<(), StorageError> {
            self.inner.delete(location).await
        }

        async fn exists(&self, location: &ObjectLocation) -> Result<bool, StorageError> {
            self.inner.exists(location).await
        }

        async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
            self.inner.list(bucket, prefix).await
        }
    }

    struct BrokenAuditLog;

    #[async_trait]
    impl AuditLog for BrokenAuditLog {
        fn name(&self) -> &str {
            "broken"
        }

        async fn append(&self, _entry: LogEntry) -> Result<(), AuditError> {
            Err(AuditError::Write("table unavailable".into()))
        }

        async fn query(&self, _filter: &LogFilter) -> Result<Vec<LogEntry>, AuditError> {
            Err(AuditError::Query("table unavailable".into()))
        }
    }

    struct Harness {
        store: Arc<FlakyStore>,
        audit: Arc<InMemoryAuditLog>,
        engine: RoutingEngine,
    }

    fn harness() -> Harness {
        let store = Arc::new(FlakyStore::new());
        let audit = Arc::new(InMemoryAuditLog::new());
        let engine = RoutingEngine::new(store.clone(), audit.clone(), Buckets::new("processed", "archive"))
            .with_today(fixed_today);
        Harness { store, audit, engine }
    }

    async fn statuses(audit: &InMemoryAuditLog, pk: &str) -> Vec<RouteStatus> {
        audit.entries_for(pk).await.iter().map(|e| e.status).collect()
    }

    #[tokio::test]
    async fn first_upload_becomes_current() {
        let h = harness();
        h.store.put(&loc("intake", "uploads/acme/activity-2024.csv"), b"v1".to_vec()).await.unwrap();

        let outcome = h.engine.route("intake", "uploads/acme/activity-2024.csv").await.unwrap();

        let dest = loc("processed", "clients/acme/daily-activity/current/activity-2024.csv");
        assert_eq!(
            outcome,
            RouteOutcome::Promoted {
                dest: dest.clone(),
                archived: None
            }
        );
        assert_eq!(h.store.get(&dest).await.unwrap(), b"v1");
        assert!(!h.store.exists(&loc("intake", "uploads/acme/activity-2024.csv")).await.unwrap());
        assert_eq!(
            statuses(&h.audit, "s3://intake/uploads/acme/activity-2024.csv").await,
            vec![RouteStatus::Received, RouteStatus::Processed]
        );

        let processed = &h.audit.entries().await[1];
        assert_eq!(
            processed.dest.as_deref(),
            Some("s3://processed/clients/acme/daily-activity/current/activity-2024.csv")
        );
        assert_eq!(processed.sk, "2025-02-14");
        assert_eq!(processed.client.as_deref(), Some("acme"));
        assert_eq!(processed.doc_type.as_deref(), Some("daily-activity"));
    }

    #[tokio::test]
    async fn newer_upload_archives_prior_current() {
        let h = harness();
        let prior = loc("processed", "clients/acme/daily-activity/current/activity-2024.csv");
        h.store.put(&prior, b"old".to_vec()).await.unwrap();
        h.store.put(&loc("intake", "uploads/acme/activity-2025.csv"), b"new".to_vec()).await.unwrap();

        let outcome = h.engine.route("intake", "uploads/acme/activity-2025.csv").await.unwrap();

        let archived = loc("archive", "clients/acme/daily-activity/2025-02-14/activity-2024.csv");
        let dest = loc("processed", "clients/acme/daily-activity/current/activity-2025.csv");
        assert_eq!(
            outcome,
            RouteOutcome::Promoted {
                dest: dest.clone(),
                archived: Some(archived.clone())
            }
        );
        assert_eq!(h.store.get(&archived).await.unwrap(), b"old");
        assert!(!h.store.exists(&prior).await.unwrap());
        assert_eq!(
            h.store.list("processed", "clients/acme/daily-activity/current/").await.unwrap(),
            vec![dest.key.clone()]
        );
        assert_eq!(
            statuses(&h.audit, "s3://intake/uploads/acme/activity-2025.csv").await,
            vec![RouteStatus::Received, RouteStatus::Archiving, RouteStatus::Processed]
        );

        let archiving = &h.audit.entries().await[1];
        assert_eq!(archiving.dest.as_deref(), Some(archived.uri().as_str()));
    }

    #[tokio::test]
    async fn reupload_with_same_name_is_not_self_archived() {
        let h = harness();
        let current = loc("processed", "clients/acme/daily-balance/current/balance.csv");
        h.store.put(&current, b"monday".to_vec()).await.unwrap();
        h.store.put(&loc("intake", "uploads/acme/balance.csv"), b"tuesday".to_vec()).await.unwrap();

        let outcome = h.engine.route("intake", "uploads/acme/balance.csv").await.unwrap();

        assert_eq!(
            outcome,
            RouteOutcome::Promoted {
                dest: current.clone(),
                archived: None
            }
        );
        assert_eq!(h.store.get(&current).await.unwrap(), b"tuesday");
        assert!(h.store.list("archive", "").await.unwrap().is_empty());
        assert_eq!(
            statuses(&h.audit, "s3://intake/uploads/acme/balance.csv").await,
            vec![RouteStatus::Received, RouteStatus::Processed]
        );
    }

    #[tokio::test]
    async fn routing_twice_is_idempotent() {
        let h = harness();
        h.store
            .put(&loc("processed", "clients/acme/daily-activity/current/activity-2024.csv"), b"old".to_vec())
            .await
            .unwrap();
        h.store.put(&loc("intake", "uploads/acme/activity-2025.csv"), b"new".to_vec()).await.unwrap();

        h.engine.route("intake", "uploads/acme/activity-2025.csv").await.unwrap();
        let second = h.engine.route("intake", "uploads/acme/activity-2025.csv").await.unwrap();

        assert_eq!(
            second,
            RouteOutcome::AlreadyRouted {
                dest: loc("processed", "clients/acme/daily-activity/current/activity-2025.csv")
            }
        );
        assert_eq!(
            h.store.list("processed", "clients/acme/daily-activity/current/").await.unwrap().len(),
            1
        );
        assert_eq!(h.store.list("archive", "").await.unwrap().len(), 1);
        assert_eq!(
            statuses(&h.audit, "s3://intake/uploads/acme/activity-2025.csv").await,
            vec![
                RouteStatus::Received,
                RouteStatus::Archiving,
                RouteStatus::Processed,
                RouteStatus::Received,
                RouteStatus::Processed,
            ]
        );
    }

    #[tokio::test]
    async fn malformed_keys_are_skipped_silently() {
        let h = harness();
        for key in ["uploads/acme", "incoming/acme/a.csv", "uploads//a.csv"] {
            let outcome = h.engine.route("intake", key).await.unwrap();
            assert_eq!(outcome, RouteOutcome::Skipped { key: key.to_string() });
        }
        assert_eq!(h.audit.count().await, 0);
    }

    #[tokio::test]
    async fn promotion_failure_is_logged_and_propagated() {
        let h = harness();
        h.store.put(&loc("intake", "uploads/acme/activity-2024.csv"), b"v1".to_vec()).await.unwrap();
        h.store.fail_copies_into("processed");

        let err = h.engine.route("intake", "uploads/acme/activity-2024.csv").await.unwrap_err();
        assert!(matches!(err, RouteError::Storage(StorageError::Backend(_))));

        let entries = h.audit.entries_for("s3://intake/uploads/acme/activity-2024.csv").await;
        let statuses: Vec<_> = entries.iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![RouteStatus::Received, RouteStatus::Failed]);
        assert!(entries[1].error.as_deref().unwrap().contains("SlowDown"));
        // The upload stays in intake for the redrive.
        assert!(h.store.exists(&loc("intake", "uploads/acme/activity-2024.csv")).await.unwrap());
    }

    #[tokio::test]
    async fn archive_failure_leaves_prior_current() {
        let h = harness();
        let prior = loc("processed", "clients/acme/daily-activity/current/activity-2024.csv");
        h.store.put(&prior, b"old".to_vec()).await.unwrap();
        h.store.put(&loc("intake", "uploads/acme/activity-2025.csv"), b"new".to_vec()).await.unwrap();
        h.store.fail_copies_into("archive");

        assert!(h.engine.route("intake", "uploads/acme/activity-2025.csv").await.is_err());
        assert!(h.store.exists(&prior).await.unwrap());
        assert!(h.store.exists(&loc("intake", "uploads/acme/activity-2025.csv")).await.unwrap());
        assert_eq!(
            statuses(&h.audit, "s3://intake/uploads/acme/activity-2025.csv").await,
            vec![RouteStatus::Received, RouteStatus::Archiving, RouteStatus::Failed]
        );
    }

    #[tokio::test]
    async fn redrive_after_failure_converges() {
        let h = harness();
        h.store.put(&loc("intake", "uploads/acme/activity-2024.csv"), b"v1".to_vec()).await.unwrap();
        h.store.fail_copies_into("processed");
        assert!(h.engine.route("intake", "uploads/acme/activity-2024.csv").await.is_err());

        *h.store.fail_copy_into.lock().unwrap() = None;
        let outcome = h.engine.route("intake", "uploads/acme/activity-2024.csv").await.unwrap();
        assert!(matches!(outcome, RouteOutcome::Promoted { archived: None, .. }));
    }

    #[tokio::test]
    async fn missing_source_never_promoted_fails() {
        let h = harness();
        let err = h.engine.route("intake", "uploads/acme/activity-2024.csv").await.unwrap_err();
        assert!(matches!(err, RouteError::SourceMissing { .. }));
        assert_eq!(
            statuses(&h.audit, "s3://intake/uploads/acme/activity-2024.csv").await,
            vec![RouteStatus::Received, RouteStatus::Failed]
        );
    }

    #[tokio::test]
    async fn redelivery_after_being_superseded_is_tolerated() {
        let h = harness();
        for name in ["activity-a.csv", "activity-b.csv"] {
            h.store.put(&loc("intake", &format!("uploads/acme/{name}")), vec![]).await.unwrap();
            h.engine.route("intake", &format!("uploads/acme/{name}")).await.unwrap();
        }

        let outcome = h.engine.route("intake", "uploads/acme/activity-a.csv").await.unwrap();

        assert_eq!(
            outcome,
            RouteOutcome::AlreadyRouted {
                dest: loc("processed", "clients/acme/daily-activity/current/activity-a.csv")
            }
        );
        assert_eq!(
            h.store.list("processed", "clients/acme/daily-activity/current/").await.unwrap(),
            vec!["clients/acme/daily-activity/current/activity-b.csv".to_string()]
        );
        assert_eq!(
            statuses(&h.audit, "s3://intake/uploads/acme/activity-a.csv").await,
            vec![
                RouteStatus::Received,
                RouteStatus::Processed,
                RouteStatus::Received,
                RouteStatus::Processed,
            ]
        );
    }

    #[tokio::test]
    async fn superseded_redelivery_on_a_later_day_uses_the_audit_trail() {
        let store = Arc::new(InMemoryObjectStore::new());
        let audit = Arc::new(InMemoryAuditLog::new());
        let source = loc("intake", "uploads/acme/balance-jan.csv");
        // Archived on an earlier day, so today's archive has no copy.
        store
            .put(&loc("archive", "clients/acme/daily-balance/2025-01-31/balance-jan.csv"), vec![])
            .await
            .unwrap();
        audit
            .append(
                LogEntry::new(&source, fixed_today(), RouteStatus::Processed)
                    .with_slot("acme", DocType::DailyBalance),
            )
            .await
            .unwrap();
        let engine = RoutingEngine::new(store, audit.clone(), Buckets::new("processed", "archive")).with_today(fixed_today);

        let outcome = engine.route("intake", "uploads/acme/balance-jan.csv").await.unwrap();
        assert!(matches!(outcome, RouteOutcome::AlreadyRouted { .. }));
    }

    #[tokio::test]
    async fn audit_failures_do_not_affect_routing() {
        let store = Arc::new(InMemoryObjectStore::new());
        let engine = RoutingEngine::new(store.clone(), Arc::new(BrokenAuditLog), Buckets::new("processed", "archive"));
        store.put(&loc("intake", "uploads/acme/balance.csv"), vec![1]).await.unwrap();

        let outcome = engine.route("intake", "uploads/acme/balance.csv").await.unwrap();
        assert!(matches!(outcome, RouteOutcome::Promoted { .. }));
        assert!(store.exists(&loc("processed", "clients/acme/daily-balance/current/balance.csv")).await.unwrap());
    }

    #[tokio::test]
    async fn unclassified_files_default_with_note() {
        let h = harness();
        h.store.put(&loc("intake", "uploads/acme/statement.pdf"), vec![]).await.unwrap();

        h.engine.route("intake", "uploads/acme/statement.pdf").await.unwrap();

        assert!(h.store.exists(&loc("processed", "clients/acme/daily-activity/current/statement.pdf")).await.unwrap());
        let received = &h.audit.entries().await[0];
        assert_eq!(received.status, RouteStatus::Received);
        assert!(received.note.as_deref().unwrap().contains("unclassified"));
    }

    #[tokio::test]
    async fn document_types_use_separate_slots() {
        let h = harness();
        h.store
            .put(&loc("processed", "clients/acme/daily-activity/current/activity.csv"), vec![])
            .await
            .unwrap();
        h.store.put(&loc("intake", "uploads/acme/balance.csv"), vec![]).await.unwrap();

        let outcome = h.engine.route("intake", "uploads/acme/balance.csv").await.unwrap();
        assert!(matches!(outcome, RouteOutcome::Promoted { archived: None, .. }));
        assert!(h.store.exists(&loc("processed", "clients/acme/daily-activity/current/activity.csv")).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_uploads_to_one_slot_keep_a_single_current() {
        let h = harness();
        for name in ["activity-a.csv", "activity-b.csv", "activity-c.csv"] {
            h.store.put(&loc("intake", &format!("uploads/acme/{name}")), vec![]).await.unwrap();
        }

        let (a, b, c) = tokio::join!(
            h.engine.route("intake", "uploads/acme/activity-a.csv"),
            h.engine.route("intake", "uploads/acme/activity-b.csv"),
            h.engine.route("intake", "uploads/acme/activity-c.csv"),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());

        let current = h.store.list("processed", "clients/acme/daily-activity/current/").await.unwrap();
        assert_eq!(current.len(), 1);
        let archived = h.store.list("archive", "clients/acme/daily-activity/2025-02-14/").await.unwrap();
        assert_eq!(archived.len(), 2);
    }
}
