//! Correction planning.

use crate::partition::Partition;
use crate::resolver::SyncRoot;
use drivesync_types::{EntityPatch, FileId, RemoteEntity};
use std::fmt;

/// What a correction does to `syncRootId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionKind {
    /// Point the entity at the resolved root.
    Assign,
    /// Clear a stale tag on an entity outside the subtree.
    Clear,
}

/// A planned `syncRootId` write for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub id: FileId,
    pub name: String,
    /// Value before the write, empty when absent.
    pub current: String,
    pub kind: CorrectionKind,
    /// Value after the write, empty for [`CorrectionKind::Clear`].
    pub target: String,
}

impl Correction {
    fn assign(entity: &RemoteEntity, root: &FileId) -> Self {
        Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            current: entity.raw_sync_root_id().to_string(),
            kind: CorrectionKind::Assign,
            target: root.to_string(),
        }
    }

    fn clear(entity: &RemoteEntity) -> Self {
        Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            current: entity.raw_sync_root_id().to_string(),
            kind: CorrectionKind::Clear,
            target: String::new(),
        }
    }

    /// The store patch that applies this correction.
    pub fn patch(&self) -> EntityPatch {
        match self.kind {
            CorrectionKind::Assign => EntityPatch::assign_sync_root(&FileId::new(self.target.clone())),
            CorrectionKind::Clear => EntityPatch::clear_sync_root(),
        }
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updating syncRootId of {} [{}]. Is '{}', but should be ",
            self.name, self.id, self.current
        )?;
        match self.kind {
            CorrectionKind::Assign => write!(f, "'{}'", self.target),
            CorrectionKind::Clear => f.write_str("non existent or empty"),
        }
    }
}

/// Lists the writes needed to make tags match the partition.
///
/// Members (the root itself is never rewritten) must point at the root. Non-members must
/// carry no `syncRootId`; an empty value already counts as none.
pub fn plan_corrections(root: &SyncRoot, partition: &Partition) -> Vec<Correction> {
    let root_id = root.id();

    let assigns = partition
        .members()
        .iter()
        .filter(|entity| entity.raw_sync_root_id() != root_id.as_str())
        .map(|entity| Correction::assign(entity, root_id));

    let clears = partition
        .not_in_subtree()
        .iter()
        .filter(|entity| entity.sync_root_id().is_some())
        .map(Correction::clear);

    assigns.chain(clears).collect()
}
