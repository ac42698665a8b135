//! Remote file store clients for drivesync.
//!
//! The reconciliation engine only ever sees the [`RemoteStore`] trait. Two
//! implementations live here:
//! - [`GoogleDriveStore`]: Google Drive API v3 over HTTPS with OAuth2 tokens
//! - [`MemoryStore`]: an in-process store backed by a snapshot, for offline
//!   runs and tests
//!
//! Pagination is handled inside the clients; callers get complete listings.

mod config;
mod error;
pub mod google_drive;
pub mod memory;
mod store;

pub use config::DriveConfig;
pub use error::{DriveError, DriveResult};
pub use google_drive::{GoogleDriveStore, TokenSet};
pub use memory::{MemoryStore, StoreOp};
pub use store::RemoteStore;
