//! Copy-then-delete move between two object locations.
//!
//! The move is not atomic. A crash between the copy and the delete leaves the
//! object in both places; running the same move again converges:
//! - the copy is repeated (overwriting `dst` with identical content),
//! - deleting an already-deleted source is success,
//! - a missing source whose destination exists means an earlier delivery
//!   finished the move, reported as [`MoveOutcome::AlreadyMoved`].

use docroute_core::error::StorageError;
use docroute_core::location::ObjectLocation;
use docroute_core::storage::ObjectStore;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The object was copied to `dst` and removed from `src`.
    Moved,
    /// `src` was gone and `dst` already present.
    AlreadyMoved,
}

/// Move `src` to `dst` through `store`.
pub async fn move_object(
    store: &dyn ObjectStore,
    src: &ObjectLocation,
    dst: &ObjectLocation,
) -> Result<MoveOutcome, StorageError> {
    if src == dst {
        return match store.exists(src).await? {
            true => Ok(MoveOutcome::AlreadyMoved),
            false => Err(StorageError::NotFound { location: src.uri() }),
        };
    }

    if let Err(e) = store.copy(src, dst).await {
        if e.is_not_found() && store.exists(dst).await? {
            debug!(src = %src, dst = %dst, "Source already moved");
            return Ok(MoveOutcome::AlreadyMoved);
        }
        return Err(e);
    }

    store.delete(src).await?;
    info!(src = %src, dst = %dst, "MOVED");
    Ok(MoveOutcome::Moved)
}
