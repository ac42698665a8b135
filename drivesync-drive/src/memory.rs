//! In-process store backed by a snapshot.
//!
//! Holds entities in insertion order and applies updates the way the Drive
//! API does: only the supplied app properties change. Queries are not
//! interpreted; a listing returns every held entity.

use crate::error::{DriveError, DriveResult};
use crate::store::RemoteStore;
use async_trait::async_trait;
use drivesync_types::{EntityPatch, Field, FileId, RemoteEntity};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::debug;

/// Store operation, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    List,
    Update,
}

/// Snapshot files may be a bare array or a listing response.
#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Entities(Vec<RemoteEntity>),
    Listing { files: Vec<RemoteEntity> },
}

#[derive(Default)]
struct Inner {
    entities: Vec<RemoteEntity>,
    updates: Vec<(FileId, EntityPatch)>,
    failing_ops: HashMap<StoreOp, String>,
    failing_updates: HashMap<FileId, String>,
}

/// In-memory [`RemoteStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `entities` in the given order.
    pub fn from_entities(entities: Vec<RemoteEntity>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entities,
                ..Default::default()
            }),
        }
    }

    /// Parses a JSON snapshot: either `[...]` or `{"files": [...]}`.
    pub fn from_json(json: &str) -> DriveResult<Self> {
        let entities = match serde_json::from_str::<Snapshot>(json)? {
            Snapshot::Entities(entities) | Snapshot::Listing { files: entities } => entities,
        };
        Ok(Self::from_entities(entities))
    }

    /// Loads a JSON snapshot from disk.
    pub async fn load(path: &Path) -> DriveResult<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        let store = Self::from_json(&json)?;
        debug!(path = %path.display(), "Loaded snapshot");
        Ok(store)
    }

    /// Makes every call of `op` fail with a network error.
    pub async fn fail(&self, op: StoreOp, message: impl Into<String>) {
        self.inner.write().await.failing_ops.insert(op, message.into());
    }

    /// Makes updates of one entity fail with a network error.
    pub async fn fail_update_of(&self, id: impl Into<FileId>, message: impl Into<String>) {
        self.inner
            .write()
            .await
            .failing_updates
            .insert(id.into(), message.into());
    }

    /// Returns a copy of the stored entity.
    pub async fn entity(&self, id: &str) -> Option<RemoteEntity> {
        self.inner
            .read()
            .await
            .entities
            .iter()
            .find(|e| e.id.as_str() == id)
            .cloned()
    }

    /// Returns every applied update in order.
    pub async fn updates(&self) -> Vec<(FileId, EntityPatch)> {
        self.inner.read().await.updates.clone()
    }

    /// Number of held entities.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entities.len()
    }

    /// Returns true if the store holds nothing.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entities.is_empty()
    }
}

fn injected(inner: &Inner, op: StoreOp) -> DriveResult<()> {
    match inner.failing_ops.get(&op) {
        Some(message) => Err(DriveError::Network(message.clone())),
        None => Ok(()),
    }
}

/// Keeps only the requested fields. The id is always kept.
fn project(entity: &RemoteEntity, fields: &[Field]) -> RemoteEntity {
    let mut out = RemoteEntity::new(entity.id.clone(), String::new(), String::new());
    for field in fields {
        match field {
            Field::Id => {}
            Field::Name => out.name = entity.name.clone(),
            Field::Parents => out.parents = entity.parents.clone(),
            Field::Md5Checksum => out.md5_checksum = entity.md5_checksum.clone(),
            Field::MimeType => out.mime_type = entity.mime_type.clone(),
            Field::Size => out.size = entity.size,
            Field::ModifiedTime => out.modified_time = entity.modified_time,
            Field::AppProperties => out.app_properties = entity.app_properties.clone(),
        }
    }
    out
}

#[async_trait]
impl RemoteStore for MemoryStore {
    fn provider_name(&self) -> &'static str {
        "Memory"
    }

    async fn get(&self, id: &FileId, fields: &[Field]) -> DriveResult<RemoteEntity> {
        let inner = self.inner.read().await;
        injected(&inner, StoreOp::Get)?;

        inner
            .entities
            .iter()
            .find(|e| &e.id == id)
            .map(|e| project(e, fields))
            .ok_or_else(|| DriveError::NotFound(format!("file {id}")))
    }

    async fn list_all(&self, _query: &str, fields: &[Field]) -> DriveResult<Vec<RemoteEntity>> {
        let inner = self.inner.read().await;
        injected(&inner, StoreOp::List)?;

        Ok(inner.entities.iter().map(|e| project(e, fields)).collect())
    }

    async fn update(
        &self,
        id: &FileId,
        patch: &EntityPatch,
        fields: &[Field],
    ) -> DriveResult<RemoteEntity> {
        let mut inner = self.inner.write().await;
        injected(&inner, StoreOp::Update)?;
        if let Some(message) = inner.failing_updates.get(id) {
            return Err(DriveError::Network(message.clone()));
        }

        let entity = inner
            .entities
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| DriveError::NotFound(format!("file {id}")))?;

        for (key, value) in &patch.app_properties {
            entity.app_properties.insert(key.clone(), value.clone());
        }
        let updated = project(entity, fields);

        inner.updates.push((id.clone(), patch.clone()));
        Ok(updated)
    }
}
