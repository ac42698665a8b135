//! Remote store abstraction trait.

use crate::error::DriveResult;
use async_trait::async_trait;
use drivesync_types::{EntityPatch, Field, FileId, RemoteEntity};

/// Abstract remote file store.
///
/// Every call is a single blocking round trip from the caller's point of
/// view. Implementations own pagination; there is no retry here.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns the name of the store provider.
    fn provider_name(&self) -> &'static str;

    /// Fetches one entity, limited to `fields`.
    async fn get(&self, id: &FileId, fields: &[Field]) -> DriveResult<RemoteEntity>;

    /// Lists every entity matching `query`, limited to `fields`.
    async fn list_all(&self, query: &str, fields: &[Field]) -> DriveResult<Vec<RemoteEntity>>;

    /// Applies a partial update and returns the entity, limited to `fields`.
    async fn update(
        &self,
        id: &FileId,
        patch: &EntityPatch,
        fields: &[Field],
    ) -> DriveResult<RemoteEntity>;
}
