//! Sync root resolution.

use crate::error::{ReconcileError, ReconcileResult};
use drivesync_drive::RemoteStore;
use drivesync_types::{FileId, RemoteEntity, ENTITY_FIELDS};
use tracing::debug;

/// A directory proven to carry the `syncRoot` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRoot(RemoteEntity);

impl SyncRoot {
    /// Validates an already fetched entity.
    pub fn try_from_entity(entity: RemoteEntity) -> ReconcileResult<Self> {
        if !entity.is_dir() {
            return Err(ReconcileError::NotADirectory { id: entity.id });
        }
        if !entity.is_sync_root() {
            return Err(ReconcileError::NotASyncRoot { id: entity.id });
        }
        Ok(Self(entity))
    }

    pub fn id(&self) -> &FileId {
        &self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn entity(&self) -> &RemoteEntity {
        &self.0
    }

    pub fn into_entity(self) -> RemoteEntity {
        self.0
    }
}

/// Fetches `id` from the store and checks that it is a sync root.
///
/// Has no side effects. The fetched entity is returned unchanged.
pub async fn resolve_sync_root<S>(store: &S, id: &FileId) -> ReconcileResult<SyncRoot>
where
    S: RemoteStore + ?Sized,
{
    let entity = store
        .get(id, ENTITY_FIELDS)
        .await
        .map_err(|source| ReconcileError::RootLookup {
            id: id.clone(),
            source,
        })?;

    debug!(root_id = %entity.id, name = %entity.name, "Fetched root candidate");
    SyncRoot::try_from_entity(entity)
}
