//! Core type definitions for drivesync.
//!
//! This crate defines the snapshot model shared by the store client and the
//! reconciliation engine:
//! - Remote file identifiers
//! - Remote entities (files and directories) as returned by the store
//! - Partial-attribute patches sent back to the store
//! - Field projections used when talking to the store
//!
//! Entities are read-only snapshots. Nothing here talks to the network.

mod entity;
mod fields;
mod ids;

pub use entity::{
    EntityPatch, RemoteEntity, FOLDER_MIME_TYPE, SYNC_ROOT_ID_KEY, SYNC_ROOT_KEY,
};
pub use fields::{Field, ENTITY_FIELDS, LISTING_FIELDS, OWNED_NOT_TRASHED_QUERY};
pub use ids::FileId;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file id must not be empty")]
    EmptyId,
}
