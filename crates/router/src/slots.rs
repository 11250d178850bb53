//! Per-slot serialization.
//!
//! Two uploads for the same (client, doc type) race on "look up the current
//! object, archive it, promote the new one". `SlotLocks` gives each slot an
//! async mutex so those steps run one event at a time per slot, while events
//! for different slots never contend.
//!
//! Exclusion is per process. Several routing processes sharing one store
//! need an external lock or a partitioned single-writer assignment.

use docroute_core::SlotKey;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-slot locks. Entries nobody holds or waits on are pruned.
#[derive(Default)]
pub struct SlotLocks {
    slots: std::sync::Mutex<HashMap<SlotKey, Arc<Mutex<()>>>>,
}

impl SlotLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `slot`. Released when the guard drops.
    pub async fn acquire(&self, slot: &SlotKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots.retain(|_, lock| Arc::strong_count(lock) > 1);
            slots.entry(slot.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of slots currently held or awaited.
    pub fn active(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.values().filter(|lock| Arc::strong_count(lock) > 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docroute_core::DocType;
    use std::time::Duration;

    #[tokio::test]
    async fn same_slot_is_exclusive() {
        let locks = SlotLocks::new();
        let slot = SlotKey::new("acme", DocType::DailyActivity);

        let guard = locks.acquire(&slot).await;
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(&slot)).await;
        assert!(second.is_err(), "second holder got the slot while the first held it");

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(50), locks.acquire(&slot)).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn different_slots_do_not_contend() {
        let locks = SlotLocks::new();
        let _activity = locks.acquire(&SlotKey::new("acme", DocType::DailyActivity)).await;

        let balance = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire(&SlotKey::new("acme", DocType::DailyBalance)),
        )
        .await;
        assert!(balance.is_ok());

        let other_client = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire(&SlotKey::new("globex", DocType::DailyActivity)),
        )
        .await;
        assert!(other_client.is_ok());
    }

    #[tokio::test]
    async fn released_slots_are_pruned() {
        let locks = SlotLocks::new();
        {
            let _a = locks.acquire(&SlotKey::new("acme", DocType::DailyActivity)).await;
            let _b = locks.acquire(&SlotKey::new("globex", DocType::DailyBalance)).await;
            assert_eq!(locks.active(), 2);
        }
        assert_eq!(locks.active(), 0);

        let _c = locks.acquire(&SlotKey::new("initech", DocType::DailyActivity)).await;
        assert_eq!(locks.slots.lock().unwrap().len(), 1);
    }
}
