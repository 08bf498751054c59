//! Core type definitions for delta-contacts.
//!
//! This crate defines the values that flow through the contact sync engine:
//! - Raw per-field rows as produced by a platform row source
//! - Aggregated, normalized contacts
//! - Sync checkpoints (timestamp watermarks or opaque history tokens)
//! - Record-shaped contacts for sources that enumerate whole contacts
//! - JSON payloads handed to a UI layer
//!
//! Nothing here performs I/O. Normalization and reconciliation live in
//! `deltacontacts-sync`.

mod checkpoint;
mod contact;
mod record;
mod row;
mod wire;

pub use checkpoint::SyncCheckpoint;
pub use contact::{Contact, OrderedSet};
pub use record::ContactRecord;
pub use row::{FieldKind, RawFieldRow};
pub use wire::{SyncResponse, WireContact};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid checkpoint: {0}")]
    InvalidCheckpoint(String),
}
