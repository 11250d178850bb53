//! In-memory object store: useful for testing and ephemeral runs.

use async_trait::async_trait;
use docroute_core::error::StorageError;
use docroute_core::location::ObjectLocation;
use docroute_core::storage::ObjectStore;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An object store that keeps every bucket in one ordered map.
///
/// Keys are `(bucket, key)` so prefix listing is a range scan.
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<BTreeMap<(String, String), Vec<u8>>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of objects across all buckets.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

fn map_key(location: &ObjectLocation) -> (String, String) {
    (location.bucket.clone(), location.key.clone())
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn put(&self, location: &ObjectLocation, body: Vec<u8>) -> Result<(), StorageError> {
        self.objects.write().await.insert(map_key(location), body);
        Ok(())
    }

    async fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError> {
        self.objects
            .read()
            .await
            .get(&map_key(location))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                location: location.uri(),
            })
    }

    async fn copy(&self, src: &ObjectLocation, dst: &ObjectLocation) -> Result<(), StorageError> {
        let mut objects = self.objects.write().await;
        let body = objects
            .get(&map_key(src))
            .cloned()
            .ok_or_else(|| StorageError::NotFound { location: src.uri() })?;
        objects.insert(map_key(dst), body);
        Ok(())
    }

    async fn delete(&self, location: &ObjectLocation) -> Result<(), StorageError> {
        self.objects.write().await.remove(&map_key(location));
        Ok(())
    }

    async fn exists(&self, location: &ObjectLocation) -> Result<bool, StorageError> {
        Ok(self.objects.read().await.contains_key(&map_key(location)))
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
        let objects = self.objects.read().await;
        let start = (bucket.to_string(), prefix.to_string());
        Ok(objects
            .range(start..)
            .take_while(|((b, k), _)| b == bucket && k.starts_with(prefix))
            .map(|((_, k), _)| k.clone())
            .collect())
    }
}
