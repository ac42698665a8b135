//! Error types for reconciliation.

use drivesync_drive::DriveError;
use drivesync_types::FileId;
use thiserror::Error;

/// Result type for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors that abort a reconciliation run.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The root could not be fetched.
    #[error("failed to find root dir {id}: {source}")]
    RootLookup { id: FileId, source: DriveError },

    /// The root is a file, not a directory.
    #[error("provided root id {id} is not a directory")]
    NotADirectory { id: FileId },

    /// The root directory lacks the `syncRoot` marker.
    #[error("root dir with id {id} is not a sync root")]
    NotASyncRoot { id: FileId },

    /// The full listing failed.
    #[error("failed listing files: {0}")]
    Listing(#[source] DriveError),

    /// A correction write failed. Earlier writes stay applied.
    #[error("failed to update syncRootId of {id}: {source}")]
    Update { id: FileId, source: DriveError },
}

impl ReconcileError {
    /// Returns true for errors raised before any listing or write happened.
    pub fn is_root_error(&self) -> bool {
        matches!(
            self,
            ReconcileError::RootLookup { .. }
                | ReconcileError::NotADirectory { .. }
                | ReconcileError::NotASyncRoot { .. }
        )
    }
}
