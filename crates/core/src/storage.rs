//! Object store capability: the copy/delete/list primitives routing is built on.
//!
//! Implementations: in-memory (testing), local filesystem. Anything with
//! server-side copy and prefix listing fits behind this trait.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::location::ObjectLocation;

/// The core ObjectStore trait.
///
/// Every method takes explicit bucket names; a store serves all buckets.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// The backend name (e.g., "memory", "fs").
    fn name(&self) -> &str;

    /// Write an object, replacing any existing one at the same location.
    async fn put(&self, location: &ObjectLocation, body: Vec<u8>) -> Result<(), StorageError>;

    /// Read an object's bytes.
    async fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError>;

    /// Copy `src` to `dst`, overwriting `dst`.
    ///
    /// Fails with `StorageError::NotFound` if `src` does not exist.
    async fn copy(&self, src: &ObjectLocation, dst: &ObjectLocation) -> Result<(), StorageError>;

    /// Delete an object. Deleting a missing object succeeds.
    async fn delete(&self, location: &ObjectLocation) -> Result<(), StorageError>;

    /// Whether an object exists.
    async fn exists(&self, location: &ObjectLocation) -> Result<bool, StorageError>;

    /// All keys in `bucket` starting with `prefix`, in lexicographic order.
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Any one key under `prefix`, if there is one.
    async fn find_any(&self, bucket: &str, prefix: &str) -> Result<Option<String>, StorageError> {
        Ok(self.list(bucket, prefix).await?.into_iter().next())
    }
}
