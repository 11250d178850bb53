//! Filesystem object store: buckets are directories under a root.
//!
//! Layout: `<root>/<bucket>/<key>`, with every `/` in a key becoming a
//! directory separator. Keys are validated so they can never resolve outside
//! their bucket directory.
//!
//! Copies go through a `.docroute-partial` sibling file that is renamed into
//! place, so a reader never observes a half-written destination.

use async_trait::async_trait;
use docroute_core::error::StorageError;
use docroute_core::location::ObjectLocation;
use docroute_core::storage::ObjectStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const PARTIAL_SUFFIX: &str = ".docroute-partial";

/// A filesystem-backed object store.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store rooted at `root`. Directories are created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        debug!(root = %root.display(), "Filesystem object store opened");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_dir(&self, bucket: &str) -> Result<PathBuf, StorageError> {
        check_segment(bucket, bucket)?;
        Ok(self.root.join(bucket))
    }

    /// Map a location to its file path, rejecting keys that would escape the bucket.
    fn resolve(&self, location: &ObjectLocation) -> Result<PathBuf, StorageError> {
        let mut path = self.bucket_dir(&location.bucket)?;
        for segment in location.key.split('/') {
            check_segment(segment, &location.key)?;
            path.push(segment);
        }
        if location.key.ends_with(PARTIAL_SUFFIX) {
            return Err(StorageError::InvalidKey {
                key: location.key.clone(),
                reason: format!("keys may not end in {PARTIAL_SUFFIX}"),
            });
        }
        Ok(path)
    }
}

fn check_segment(segment: &str, key: &str) -> Result<(), StorageError> {
    let reason = if segment.is_empty() {
        "empty path segment"
    } else if segment == "." || segment == ".." {
        "relative path segment"
    } else if segment.contains('\\') || segment.contains('\0') {
        "illegal character"
    } else {
        return Ok(());
    };
    Err(StorageError::InvalidKey {
        key: key.to_string(),
        reason: reason.into(),
    })
}

fn io_error(location: &ObjectLocation, e: std::io::Error) -> StorageError {
    if e.kind() == ErrorKind::NotFound {
        StorageError::NotFound {
            location: location.uri(),
        }
    } else {
        StorageError::Backend(format!("{location}: {e}"))
    }
}

async fn ensure_parent(path: &Path, location: &ObjectLocation) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::Backend(format!("{location}: failed to create directory: {e}")))?;
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    fn name(&self) -> &str {
        "fs"
    }

    async fn put(&self, location: &ObjectLocation, body: Vec<u8>) -> Result<(), StorageError> {
        let path = self.resolve(location)?;
        ensure_parent(&path, location).await?;
        let partial = partial_path(&path);
        tokio::fs::write(&partial, body)
            .await
            .map_err(|e| io_error(location, e))?;
        tokio::fs::rename(&partial, &path)
            .await
            .map_err(|e| io_error(location, e))
    }

    async fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(location)?;
        tokio::fs::read(&path).await.map_err(|e| io_error(location, e))
    }

    async fn copy(&self, src: &ObjectLocation, dst: &ObjectLocation) -> Result<(), StorageError> {
        let src_path = self.resolve(src)?;
        let dst_path = self.resolve(dst)?;

        if src_path == dst_path {
            return match self.exists(src).await? {
                true => Ok(()),
                false => Err(StorageError::NotFound { location: src.uri() }),
            };
        }

        ensure_parent(&dst_path, dst).await?;
        let partial = partial_path(&dst_path);
        tokio::fs::copy(&src_path, &partial)
            .await
            .map_err(|e| io_error(src, e))?;
        tokio::fs::rename(&partial, &dst_path)
            .await
            .map_err(|e| io_error(dst, e))
    }

    async fn delete(&self, location: &ObjectLocation) -> Result<(), StorageError> {
        let path = self.resolve(location)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(location, e)),
        }
    }

    async fn exists(&self, location: &ObjectLocation) -> Result<bool, StorageError> {
        let path = self.resolve(location)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(location, e)),
        }
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
        let bucket_dir = self.bucket_dir(bucket)?;

        // Start the walk at the deepest directory the prefix fully names.
        let dir_part = prefix.rfind('/').map(|i| &prefix[..i]).unwrap_or("");
        let mut start = bucket_dir.clone();
        for segment in dir_part.split('/').filter(|s| !s.is_empty()) {
            check_segment(segment, prefix)?;
            start.push(segment);
        }

        let mut keys = Vec::new();
        let mut pending = vec![start];
        while let Some(dir) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(StorageError::Backend(format!("{}: {e}", dir.display()))),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| StorageError::Backend(format!("{}: {e}", dir.display())))?
            {
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| StorageError::Backend(e.to_string()))?;
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }

                let Ok(relative) = path.strip_prefix(&bucket_dir) else {
                    continue;
                };
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                if key.starts_with(prefix) && !key.ends_with(PARTIAL_SUFFIX) {
                    keys.push(key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
