use drivesync_drive::{MemoryStore, StoreOp};
use drivesync_reconcile::{
    partition, plan_corrections, CorrectionKind, ReconcileError, ReconcileOptions, Reconciler,
    SyncRoot,
};
use drivesync_types::{EntityPatch, FileId, RemoteEntity, SYNC_ROOT_ID_KEY, SYNC_ROOT_KEY};
use pretty_assertions::assert_eq;

fn root_entity(id: &str) -> RemoteEntity {
    RemoteEntity::folder(id, "Sync").with_app_property(SYNC_ROOT_KEY, "true")
}

fn file(id: &str, parent: &str, tag: Option<&str>) -> RemoteEntity {
    let entity = RemoteEntity::new(id, format!("{id}.txt"), "text/plain").with_parents([parent]);
    match tag {
        Some(tag) => entity.with_app_property(SYNC_ROOT_ID_KEY, tag),
        None => entity,
    }
}

fn live() -> ReconcileOptions {
    ReconcileOptions::default()
}

fn dry() -> ReconcileOptions {
    ReconcileOptions { dry_run: true }
}

// ── Planning ────────────────────────────────────────────────────

#[test]
fn member_with_foreign_tag_is_reassigned() {
    let root = SyncRoot::try_from_entity(root_entity("rootY")).unwrap();
    let p = partition(&root, vec![file("C", "rootY", Some("rootX"))]);

    let plan = plan_corrections(&root, &p);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].id.as_str(), "C");
    assert_eq!(plan[0].kind, CorrectionKind::Assign);
    assert_eq!(plan[0].current, "rootX");
    assert_eq!(plan[0].target, "rootY");
    assert_eq!(plan[0].patch(), EntityPatch::assign_sync_root(&FileId::new("rootY")));
}

#[test]
fn member_without_tag_is_assigned() {
    let root = SyncRoot::try_from_entity(root_entity("R")).unwrap();
    let p = partition(&root, vec![file("a", "R", None)]);
    let plan = plan_corrections(&root, &p);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].current, "");
}

#[test]
fn member_with_correct_tag_is_left_alone() {
    let root = SyncRoot::try_from_entity(root_entity("R")).unwrap();
    let p = partition(&root, vec![file("a", "R", Some("R"))]);
    assert!(plan_corrections(&root, &p).is_empty());
}

#[test]
fn outsider_with_empty_tag_is_left_alone() {
    let root = SyncRoot::try_from_entity(root_entity("R")).unwrap();
    let p = partition(&root, vec![file("D", "elsewhere", Some(""))]);
    assert!(plan_corrections(&root, &p).is_empty());
}

#[test]
fn outsider_without_tag_is_left_alone() {
    let root = SyncRoot::try_from_entity(root_entity("R")).unwrap();
    let p = partition(&root, vec![file("D", "elsewhere", None)]);
    assert!(plan_corrections(&root, &p).is_empty());
}

#[test]
fn outsider_with_stale_tag_is_cleared() {
    let root = SyncRoot::try_from_entity(root_entity("R")).unwrap();
    let p = partition(&root, vec![file("moved", "elsewhere", Some("R"))]);

    let plan = plan_corrections(&root, &p);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].kind, CorrectionKind::Clear);
    assert_eq!(plan[0].target, "");
    assert_eq!(plan[0].patch(), EntityPatch::clear_sync_root());
}

#[test]
fn root_is_never_rewritten() {
    // The root carries no syncRootId but must not be tagged with itself.
    let raw_root = root_entity("R");
    let root = SyncRoot::try_from_entity(raw_root.clone()).unwrap();
    let p = partition(&root, vec![raw_root, file("a", "R", Some("R"))]);
    assert!(plan_corrections(&root, &p).is_empty());
}

#[test]
fn correction_messages() {
    let root = SyncRoot::try_from_entity(root_entity("R")).unwrap();
    let p = partition(
        &root,
        vec![file("in", "R", Some("old")), file("out", "x", Some("R"))],
    );
    let lines: Vec<String> = plan_corrections(&root, &p)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            "Updating syncRootId of in.txt [in]. Is 'old', but should be 'R'".to_string(),
            "Updating syncRootId of out.txt [out]. Is 'R', but should be non existent or empty"
                .to_string(),
        ]
    );
}

// ── Full runs ───────────────────────────────────────────────────

fn drifted_store() -> MemoryStore {
    MemoryStore::from_entities(vec![
        root_entity("R"),
        RemoteEntity::folder("A", "A").with_parents(["R"]).with_app_property(SYNC_ROOT_ID_KEY, "R"),
        file("B", "A", Some("other-root")),
        file("new", "R", None),
        file("moved-out", "elsewhere", Some("R")),
        file("clean", "elsewhere", Some("")),
        file("untagged", "elsewhere", None),
    ])
}

#[tokio::test]
async fn run_applies_corrections() {
    let store = drifted_store();
    let report = Reconciler::new(&store, live())
        .run(&FileId::new("R"))
        .await
        .unwrap();

    assert_eq!(report.root_id.as_str(), "R");
    assert_eq!(report.root_name, "Sync");
    assert_eq!(report.listed, 7);
    assert_eq!(report.in_subtree, 3);
    assert_eq!(report.not_in_subtree, 3);
    assert_eq!(report.corrections.len(), 3);
    assert_eq!(report.applied, 3);
    assert!(!report.dry_run);

    assert_eq!(store.entity("B").await.unwrap().sync_root_id(), Some("R"));
    assert_eq!(store.entity("new").await.unwrap().sync_root_id(), Some("R"));
    assert_eq!(store.entity("moved-out").await.unwrap().sync_root_id(), None);
    assert_eq!(store.entity("clean").await.unwrap().raw_sync_root_id(), "");

    let updated: Vec<String> = store
        .updates()
        .await
        .into_iter()
        .map(|(id, _)| id.to_string())
        .collect();
    assert_eq!(updated, vec!["new", "B", "moved-out"]);
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let store = drifted_store();
    let reconciler = Reconciler::new(&store, live());
    reconciler.run(&FileId::new("R")).await.unwrap();

    let report = reconciler.run(&FileId::new("R")).await.unwrap();
    assert!(report.corrections.is_empty());
    assert_eq!(report.applied, 0);
    assert_eq!(store.updates().await.len(), 3);
}

#[tokio::test]
async fn progress_reports_each_correction_in_plan_order() {
    let store = drifted_store();
    let mut seen = Vec::new();

    let report = Reconciler::new(&store, live())
        .run_with_progress(&FileId::new("R"), |c| seen.push(c.id.to_string()))
        .await
        .unwrap();

    let planned: Vec<String> = report.corrections.iter().map(|c| c.id.to_string()).collect();
    assert_eq!(seen, planned);
}

#[tokio::test]
async fn dry_run_plans_but_never_writes() {
    let store = drifted_store();
    let report = Reconciler::new(&store, dry())
        .run(&FileId::new("R"))
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.corrections.len(), 3);
    assert_eq!(report.applied, 0);
    assert!(store.updates().await.is_empty());
    assert_eq!(store.entity("B").await.unwrap().sync_root_id(), Some("other-root"));
}

#[tokio::test]
async fn dry_run_matches_live_plan() {
    let dry_report = Reconciler::new(&drifted_store(), dry())
        .run(&FileId::new("R"))
        .await
        .unwrap();
    let live_report = Reconciler::new(&drifted_store(), live())
        .run(&FileId::new("R"))
        .await
        .unwrap();
    assert_eq!(dry_report.corrections, live_report.corrections);
}

// ── Failures ────────────────────────────────────────────────────

#[tokio::test]
async fn non_directory_root_aborts_before_listing() {
    let store = MemoryStore::from_entities(vec![
        RemoteEntity::new("R", "file", "text/plain").with_app_property(SYNC_ROOT_KEY, "true"),
        file("a", "R", Some("R")),
    ]);
    // A listing would fail; the run must stop before reaching it.
    store.fail(StoreOp::List, "should not list").await;

    let err = Reconciler::new(&store, live())
        .run(&FileId::new("R"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReconcileError::NotADirectory { .. }));
}

#[tokio::test]
async fn untagged_root_aborts_even_on_dry_run() {
    let store = MemoryStore::from_entities(vec![RemoteEntity::folder("R", "Plain")]);
    let err = Reconciler::new(&store, dry())
        .run(&FileId::new("R"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReconcileError::NotASyncRoot { .. }));
}

#[tokio::test]
async fn listing_failure_aborts() {
    let store = drifted_store();
    store.fail(StoreOp::List, "503 backend").await;

    let err = Reconciler::new(&store, dry())
        .run(&FileId::new("R"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReconcileError::Listing(_)));
    assert!(err.to_string().starts_with("failed listing files"));
}

#[tokio::test]
async fn failed_write_aborts_and_keeps_earlier_writes() {
    let store = drifted_store();
    store.fail_update_of("B", "permission denied").await;

    let err = Reconciler::new(&store, live())
        .run(&FileId::new("R"))
        .await
        .unwrap_err();

    match err {
        ReconcileError::Update { id, .. } => assert_eq!(id.as_str(), "B"),
        other => panic!("unexpected error: {other:?}"),
    }
    // "new" was corrected before "B"; "moved-out" never was.
    assert_eq!(store.entity("new").await.unwrap().sync_root_id(), Some("R"));
    assert_eq!(store.entity("moved-out").await.unwrap().sync_root_id(), Some("R"));
    assert_eq!(store.updates().await.len(), 1);
}

#[tokio::test]
async fn progress_stops_at_the_failed_write() {
    let store = drifted_store();
    store.fail_update_of("B", "permission denied").await;
    let mut seen = Vec::new();

    let result = Reconciler::new(&store, live())
        .run_with_progress(&FileId::new("R"), |c| seen.push(c.id.to_string()))
        .await;

    assert!(result.is_err());
    assert_eq!(seen, vec!["new", "B"]);
}

#[tokio::test]
async fn failed_write_is_invisible_on_dry_run() {
    let store = drifted_store();
    store.fail(StoreOp::Update, "read-only").await;

    let report = Reconciler::new(&store, dry())
        .run(&FileId::new("R"))
        .await
        .unwrap();
    assert_eq!(report.corrections.len(), 3);
}
