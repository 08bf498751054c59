//! Contact aggregation and incremental sync engine.
//!
//! Turns a denormalized stream of per-field contact rows into a
//! deduplicated, normalized list of contacts, and reconciles it against a
//! caller-held checkpoint.
//!
//! # Architecture
//!
//! The engine is pure computation wrapped around three collaborators that
//! do all I/O: a [`RowSource`], an optional [`ChangeHistoryStore`] and a
//! [`PermissionGate`]. Nothing is kept between calls.
//!
//! ## Components
//!
//! - **Phone**: canonicalizes phone numbers
//! - **Merge**: folds rows into one contact per owner
//! - **Filter**: drops contacts without a name or phone number
//! - **Resolver**: picks full scan or differential fetch from the checkpoint
//! - **Assemble**: orders added before updated and hands back the checkpoint
//! - **Engine**: runs one sync against the collaborators
//!
//! ## Sync Process
//!
//! 1. **Permission**: ask the gate once; refuse without access
//! 2. **Resolve**: no checkpoint or a watermark scans, a token diffs
//! 3. **Fetch**: query rows, or changes since the token
//! 4. **Reconcile**: merge and filter each batch
//! 5. **Assemble**: one ordered list plus the checkpoint to persist
//!
//! # Example
//!
//! ```
//! use deltacontacts_sync::{filter, merge};
//! use deltacontacts_types::RawFieldRow;
//!
//! let rows = vec![
//!     RawFieldRow::phone("1", "", "+1 (415) 555-1212"),
//!     RawFieldRow::email("1", "Ada", "ada@example.com"),
//!     RawFieldRow::email("2", "", "nobody@example.com"),
//! ];
//!
//! let contacts = filter(merge(rows));
//! assert_eq!(contacts.len(), 1);
//! assert_eq!(contacts[0].name, "Ada");
//! assert_eq!(contacts[0].phone_numbers.as_slice(), ["+14155551212"]);
//! ```

pub mod assemble;
mod engine;
mod error;
pub mod filter;
pub mod memory;
pub mod merge;
pub mod phone;
pub mod pick;
pub mod resolver;
pub mod source;

pub use assemble::{assemble, ChangeSet};
pub use engine::{ContactSyncEngine, SyncConfig, SyncOutcome};
pub use error::{SyncError, SyncResult};
pub use filter::filter;
pub use memory::{InMemoryHistoryStore, InMemoryRowSource, StaticPermissionGate};
pub use merge::{merge, FieldMerger};
pub use pick::picked_contact;
pub use resolver::{classify, resolve, DeltaOutcome, Strategy};
pub use source::{
    ChangeBatch, ChangeHistoryStore, PermissionGate, RecordProvider, RecordRowSource, RowQuery,
    RowSource,
};
