use drivesync_reconcile::{partition, SyncRoot};
use drivesync_types::{RemoteEntity, SYNC_ROOT_KEY};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn root(id: &str) -> SyncRoot {
    SyncRoot::try_from_entity(RemoteEntity::folder(id, "Sync").with_app_property(SYNC_ROOT_KEY, "true"))
        .unwrap()
}

fn child(id: &str, parent: &str) -> RemoteEntity {
    RemoteEntity::new(id, format!("{id}.txt"), "text/plain").with_parents([parent])
}

fn dir(id: &str, parent: &str) -> RemoteEntity {
    RemoteEntity::folder(id, id).with_parents([parent])
}

fn ids(entities: &[RemoteEntity]) -> BTreeSet<String> {
    entities.iter().map(|e| e.id.to_string()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Scenarios ───────────────────────────────────────────────────

#[test]
fn chain_below_root_and_unrelated_file() {
    let p = partition(
        &root("R"),
        vec![dir("A", "R"), child("B", "A"), child("X", "other")],
    );

    assert_eq!(ids(p.members()), set(&["A", "B"]));
    assert_eq!(ids(p.not_in_subtree()), set(&["X"]));
    assert_eq!(p.root().id.as_str(), "R");
    assert_eq!(p.in_subtree()[0].id.as_str(), "R");
}

#[test]
fn raw_root_entry_is_discarded() {
    let raw_root = RemoteEntity::folder("R", "Sync").with_app_property(SYNC_ROOT_KEY, "true");
    let p = partition(&root("R"), vec![raw_root, child("A", "R")]);

    assert_eq!(ids(p.members()), set(&["A"]));
    assert!(p.not_in_subtree().is_empty());
    assert_eq!(p.in_subtree().len(), 2);
}

#[test]
fn raw_root_entry_with_parent_inside_is_still_discarded() {
    // A cycle through the root must not duplicate it.
    let raw_root = RemoteEntity::folder("R", "Sync").with_parents(["A"]);
    let p = partition(&root("R"), vec![dir("A", "R"), raw_root]);

    assert_eq!(ids(p.in_subtree()), set(&["R", "A"]));
    assert_eq!(p.in_subtree().len(), 2);
    assert!(p.not_in_subtree().is_empty());
}

// ── Ordering independence ───────────────────────────────────────

#[test]
fn children_listed_before_parents() {
    let p = partition(
        &root("R"),
        vec![child("d", "c"), dir("c", "b"), dir("b", "a"), dir("a", "R")],
    );
    assert_eq!(ids(p.members()), set(&["a", "b", "c", "d"]));
    assert_eq!(p.depth(), 4);
}

#[test]
fn members_are_in_discovery_order() {
    let p = partition(
        &root("R"),
        vec![child("deep", "a"), dir("a", "R"), child("top", "R")],
    );
    let order: Vec<&str> = p.in_subtree().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["R", "a", "top", "deep"]);
}

#[test]
fn outsiders_keep_listing_order() {
    let p = partition(
        &root("R"),
        vec![child("z", "nowhere"), child("in", "R"), child("y", "elsewhere")],
    );
    let order: Vec<&str> = p.not_in_subtree().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["z", "y"]);
}

// ── Edge cases ──────────────────────────────────────────────────

#[test]
fn parentless_entity_is_outside() {
    let loose = RemoteEntity::new("loose", "loose.txt", "text/plain");
    let p = partition(&root("R"), vec![loose]);
    assert_eq!(ids(p.not_in_subtree()), set(&["loose"]));
    assert!(p.members().is_empty());
}

#[test]
fn missing_intermediate_breaks_the_chain() {
    // "gap" is not in the listing, so "leaf" cannot reach the root.
    let p = partition(&root("R"), vec![child("leaf", "gap"), dir("top", "R")]);
    assert_eq!(ids(p.members()), set(&["top"]));
    assert_eq!(ids(p.not_in_subtree()), set(&["leaf"]));
}

#[test]
fn only_first_parent_counts() {
    let multi = RemoteEntity::new("m", "m.txt", "text/plain").with_parents(["other", "R"]);
    let p = partition(&root("R"), vec![multi]);
    assert!(p.members().is_empty());
    assert_eq!(ids(p.not_in_subtree()), set(&["m"]));
}

#[test]
fn cycle_disjoint_from_root_is_outside() {
    let p = partition(
        &root("R"),
        vec![dir("c1", "c3"), dir("c2", "c1"), dir("c3", "c2"), child("in", "R")],
    );
    assert_eq!(ids(p.members()), set(&["in"]));
    assert_eq!(ids(p.not_in_subtree()), set(&["c1", "c2", "c3"]));
}

#[test]
fn self_parented_entity_is_outside() {
    let p = partition(&root("R"), vec![dir("self", "self")]);
    assert_eq!(ids(p.not_in_subtree()), set(&["self"]));
}

#[test]
fn other_root_tree_is_outside() {
    let other_root = RemoteEntity::folder("R2", "Other").with_app_property(SYNC_ROOT_KEY, "true");
    let p = partition(
        &root("R"),
        vec![other_root, dir("o1", "R2"), child("o2", "o1"), child("mine", "R")],
    );
    assert_eq!(ids(p.members()), set(&["mine"]));
    assert_eq!(ids(p.not_in_subtree()), set(&["R2", "o1", "o2"]));
}

#[test]
fn contains_answers_membership() {
    let p = partition(&root("R"), vec![dir("a", "R"), child("x", "zzz")]);
    assert!(p.contains("R"));
    assert!(p.contains("a"));
    assert!(!p.contains("x"));
    assert!(!p.contains("unknown"));
}

#[test]
fn long_chain_terminates() {
    let mut listing = Vec::new();
    let mut parent = "R".to_string();
    for i in 0..2_000 {
        let id = format!("n{i}");
        listing.push(dir(&id, &parent));
        parent = id;
    }
    listing.reverse();

    let p = partition(&root("R"), listing);
    assert_eq!(p.members().len(), 2_000);
    assert_eq!(p.depth(), 2_000);
}
