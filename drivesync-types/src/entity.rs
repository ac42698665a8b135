//! Remote file snapshots and partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::FileId;

/// MIME type the store uses for directories.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// App property marking a directory as a sync root. Presence only.
pub const SYNC_ROOT_KEY: &str = "syncRoot";

/// App property naming the sync root an entity believes it belongs under.
pub const SYNC_ROOT_ID_KEY: &str = "syncRootId";

/// A file or directory as returned by the remote store.
///
/// Fields missing from a projection deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntity {
    pub id: FileId,
    #[serde(default)]
    pub name: String,
    /// Parent ids in store order. Only the first one is ever consulted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<FileId>,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub app_properties: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5_checksum: Option<String>,
    /// Size in bytes. The store encodes it as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "size_string")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
}

impl RemoteEntity {
    /// Creates a bare entity with only an id, name and MIME type.
    pub fn new(id: impl Into<FileId>, name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parents: Vec::new(),
            mime_type: mime_type.into(),
            app_properties: HashMap::new(),
            md5_checksum: None,
            size: None,
            modified_time: None,
        }
    }

    /// Creates a directory entity.
    pub fn folder(id: impl Into<FileId>, name: impl Into<String>) -> Self {
        Self::new(id, name, FOLDER_MIME_TYPE)
    }

    /// Sets the parent list.
    #[must_use]
    pub fn with_parents<I, P>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FileId>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a single app property.
    #[must_use]
    pub fn with_app_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.app_properties.insert(key.into(), value.into());
        self
    }

    /// Returns true if the entity is a directory.
    pub fn is_dir(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }

    /// The first parent id, if any.
    pub fn first_parent(&self) -> Option<&FileId> {
        self.parents.first()
    }

    /// Returns true if the `syncRoot` marker is present, whatever its value.
    pub fn is_sync_root(&self) -> bool {
        self.app_properties.contains_key(SYNC_ROOT_KEY)
    }

    /// The recorded `syncRootId`. An empty value counts as none.
    pub fn sync_root_id(&self) -> Option<&str> {
        self.app_properties
            .get(SYNC_ROOT_ID_KEY)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The raw `syncRootId` value for display, empty when absent.
    pub fn raw_sync_root_id(&self) -> &str {
        self.app_properties
            .get(SYNC_ROOT_ID_KEY)
            .map_or("", String::as_str)
    }
}

/// A partial write. Only the app properties listed here are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPatch {
    pub app_properties: HashMap<String, String>,
}

impl EntityPatch {
    /// Patch setting `syncRootId` to the given root.
    pub fn assign_sync_root(root: &FileId) -> Self {
        let mut app_properties = HashMap::new();
        app_properties.insert(SYNC_ROOT_ID_KEY.to_string(), root.to_string());
        Self { app_properties }
    }

    /// Patch clearing `syncRootId` to the empty string.
    pub fn clear_sync_root() -> Self {
        let mut app_properties = HashMap::new();
        app_properties.insert(SYNC_ROOT_ID_KEY.to_string(), String::new());
        Self { app_properties }
    }
}

mod size_string {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
