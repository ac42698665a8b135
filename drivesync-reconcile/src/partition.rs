//! Subtree partitioning.
//!
//! Splits a flat listing into the entities below a sync root and everything
//! else. Membership follows first-parent links only:
//!
//! 1. Listing entries carrying the root's own id are dropped; the resolved
//!    root already stands for them.
//! 2. The remaining entries are indexed by first parent id.
//! 3. A breadth-first walk from the root collects every reachable entry.
//!
//! Whatever the walk never reaches (orphans, trees rooted elsewhere, cycles
//! that do not pass through the root) stays outside. The walk visits each
//! entry at most once, so it always terminates, and it never mutates the
//! collection it is iterating.

use crate::resolver::SyncRoot;
use drivesync_types::{FileId, RemoteEntity};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Result of partitioning a listing around a sync root.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Root first, then members in discovery order.
    in_subtree: Vec<RemoteEntity>,
    /// Non-members in listing order.
    not_in_subtree: Vec<RemoteEntity>,
    member_ids: HashSet<FileId>,
    depth: usize,
}

impl Partition {
    /// The root followed by every member of its subtree.
    pub fn in_subtree(&self) -> &[RemoteEntity] {
        &self.in_subtree
    }

    /// Subtree members without the root.
    pub fn members(&self) -> &[RemoteEntity] {
        &self.in_subtree[1..]
    }

    /// Entities outside the subtree, in listing order.
    pub fn not_in_subtree(&self) -> &[RemoteEntity] {
        &self.not_in_subtree
    }

    /// The root entity.
    pub fn root(&self) -> &RemoteEntity {
        &self.in_subtree[0]
    }

    /// Returns true if `id` is the root or one of its descendants.
    pub fn contains(&self, id: &str) -> bool {
        self.member_ids.contains(id)
    }

    /// Number of tree levels below the root that contained members.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Partitions `entities` into the subtree of `root` and the rest.
pub fn partition(root: &SyncRoot, entities: Vec<RemoteEntity>) -> Partition {
    let root_id = root.id();
    let total = entities.len();

    let mut slots: Vec<Option<RemoteEntity>> = Vec::with_capacity(total);
    let mut children: HashMap<FileId, Vec<usize>> = HashMap::new();
    let mut seen: HashSet<FileId> = HashSet::with_capacity(total);

    for entity in entities {
        if &entity.id == root_id {
            debug!(root_id = %root_id, "Dropping root entry from listing");
            continue;
        }
        if !seen.insert(entity.id.clone()) {
            warn!(file_id = %entity.id, "Duplicate id in listing, keeping first");
            continue;
        }
        if let Some(parent) = entity.first_parent() {
            children.entry(parent.clone()).or_default().push(slots.len());
        }
        slots.push(Some(entity));
    }

    let mut in_subtree = vec![root.entity().clone()];
    let mut member_ids = HashSet::from([root_id.clone()]);
    let mut frontier = vec![root_id.clone()];
    let mut depth = 0;

    while !frontier.is_empty() {
        let mut next = Vec::new();

        for parent in &frontier {
            let Some(child_slots) = children.get(parent) else {
                continue;
            };
            for &slot in child_slots {
                let Some(entity) = slots[slot].take() else {
                    continue;
                };
                member_ids.insert(entity.id.clone());
                next.push(entity.id.clone());
                in_subtree.push(entity);
            }
        }

        if !next.is_empty() {
            depth += 1;
        }
        frontier = next;
    }

    let not_in_subtree: Vec<RemoteEntity> = slots.into_iter().flatten().collect();

    debug!(
        total,
        in_subtree = in_subtree.len() - 1,
        not_in_subtree = not_in_subtree.len(),
        depth,
        "Partitioned listing"
    );

    Partition {
        in_subtree,
        not_in_subtree,
        member_ids,
        depth,
    }
}
