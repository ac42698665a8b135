//! Reconciliation run orchestration.
//!
//! A run is strictly sequential: resolve the root, list everything, partition,
//! plan, then apply corrections one at a time. The first failure aborts the
//! run; writes that already went through are not rolled back.

use crate::error::{ReconcileError, ReconcileResult};
use crate::partition::partition;
use crate::plan::{plan_corrections, Correction};
use crate::resolver::resolve_sync_root;
use drivesync_drive::RemoteStore;
use drivesync_types::{FileId, ENTITY_FIELDS, LISTING_FIELDS, OWNED_NOT_TRASHED_QUERY};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Options for a reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Plan everything but send no writes.
    pub dry_run: bool,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub root_id: FileId,
    pub root_name: String,
    /// Entities returned by the listing.
    pub listed: usize,
    /// Subtree members, root excluded.
    pub in_subtree: usize,
    pub not_in_subtree: usize,
    /// Every planned correction, applied or not.
    pub corrections: Vec<Correction>,
    /// Corrections actually written. Always zero on a dry run.
    pub applied: usize,
    pub dry_run: bool,
    pub elapsed: Duration,
}

/// Drives a reconciliation against a store.
pub struct Reconciler<'a, S: RemoteStore + ?Sized> {
    store: &'a S,
    options: ReconcileOptions,
}

impl<'a, S: RemoteStore + ?Sized> Reconciler<'a, S> {
    pub fn new(store: &'a S, options: ReconcileOptions) -> Self {
        Self { store, options }
    }

    /// Reconciles the hierarchy below `root_id`.
    pub async fn run(&self, root_id: &FileId) -> ReconcileResult<ReconcileReport> {
        self.run_with_progress(root_id, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_correction` for each correction
    /// right before it is written (or skipped, on a dry run).
    ///
    /// When a write fails, every correction passed to the callback so far
    /// was attempted; all but the last one went through.
    pub async fn run_with_progress<F>(
        &self,
        root_id: &FileId,
        mut on_correction: F,
    ) -> ReconcileResult<ReconcileReport>
    where
        F: FnMut(&Correction),
    {
        let started = Instant::now();
        info!(
            root_id = %root_id,
            store = self.store.provider_name(),
            dry_run = self.options.dry_run,
            "Starting sync hierarchy fix"
        );

        let root = resolve_sync_root(self.store, root_id).await?;
        info!(root_id = %root.id(), name = root.name(), "Resolved sync root");

        let files = self
            .store
            .list_all(OWNED_NOT_TRASHED_QUERY, LISTING_FIELDS)
            .await
            .map_err(ReconcileError::Listing)?;
        let listed = files.len();
        info!(files = listed, "Collected file listing");

        let partition = partition(&root, files);
        let corrections = plan_corrections(&root, &partition);
        info!(
            in_subtree = partition.members().len(),
            not_in_subtree = partition.not_in_subtree().len(),
            corrections = corrections.len(),
            "Planned corrections"
        );

        let mut applied = 0;
        for correction in &corrections {
            info!("{correction}");
            on_correction(correction);
            if self.options.dry_run {
                continue;
            }

            self.store
                .update(&correction.id, &correction.patch(), ENTITY_FIELDS)
                .await
                .map_err(|source| ReconcileError::Update {
                    id: correction.id.clone(),
                    source,
                })?;
            applied += 1;
            debug!(file_id = %correction.id, "Applied correction");
        }

        let elapsed = started.elapsed();
        info!(applied, elapsed_ms = elapsed.as_millis() as u64, "Sync hierarchy fix finished");

        Ok(ReconcileReport {
            root_id: root.id().clone(),
            root_name: root.name().to_string(),
            listed,
            in_subtree: partition.members().len(),
            not_in_subtree: partition.not_in_subtree().len(),
            corrections,
            applied,
            dry_run: self.options.dry_run,
            elapsed,
        })
    }
}
