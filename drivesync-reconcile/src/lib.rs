//! Sync-root hierarchy reconciliation.
//!
//! A sync root is a directory tagged with the `syncRoot` app property. Every
//! file below it carries `syncRootId = <root id>`. When users move files in
//! or out of the tree behind the sync tool's back those tags go stale. This
//! crate finds and fixes them.
//!
//! ## Components
//!
//! - **Resolver**: fetches the root and checks it is a tagged directory
//! - **Partition**: splits a flat listing into the root's subtree and the rest
//! - **Plan**: decides which entities need their `syncRootId` rewritten
//! - **Reconciler**: drives the above against a [`RemoteStore`] and applies
//!   the plan unless running dry
//!
//! Only the first parent of an entity is considered when walking the tree.
//! An entity reachable only through a later parent is treated as outside.
//!
//! # Example
//!
//! ```
//! use drivesync_drive::MemoryStore;
//! use drivesync_reconcile::{ReconcileOptions, Reconciler};
//! use drivesync_types::{FileId, RemoteEntity};
//!
//! # tokio_test_block_on(async {
//! let store = MemoryStore::from_entities(vec![
//!     RemoteEntity::folder("root", "Sync").with_app_property("syncRoot", "true"),
//!     RemoteEntity::new("a", "a.txt", "text/plain").with_parents(["root"]),
//! ]);
//!
//! let reconciler = Reconciler::new(&store, ReconcileOptions { dry_run: true });
//! let report = reconciler.run(&FileId::new("root")).await.unwrap();
//! assert_eq!(report.corrections.len(), 1);
//! assert_eq!(report.applied, 0);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! [`RemoteStore`]: drivesync_drive::RemoteStore

mod error;
mod partition;
mod plan;
mod reconciler;
mod resolver;

pub use error::{ReconcileError, ReconcileResult};
pub use partition::{partition, Partition};
pub use plan::{plan_corrections, Correction, CorrectionKind};
pub use reconciler::{ReconcileOptions, ReconcileReport, Reconciler};
pub use resolver::{resolve_sync_root, SyncRoot};
