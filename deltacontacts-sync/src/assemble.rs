//! Change sets and their assembly into one ordered result.

use deltacontacts_types::{Contact, SyncCheckpoint};

/// The outcome of one fetch, before assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Contacts new to the caller, in source order.
    pub added: Vec<Contact>,
    /// Contacts the caller already has, in source order.
    pub updated: Vec<Contact>,
    /// Checkpoint to persist, if any.
    pub next_checkpoint: Option<SyncCheckpoint>,
    /// The caller must discard its state and treat `added` as a full replace.
    pub reset: bool,
}

impl ChangeSet {
    /// An empty, non-reset change set with no checkpoint.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no contacts were added or updated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }

    /// Total number of contacts in the change set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len()
    }
}

/// Concatenates added then updated contacts and passes the checkpoint
/// through.
///
/// No dedup across the two lists: the history store guarantees an id shows
/// up in at most one of them.
#[must_use]
pub fn assemble(change_set: ChangeSet) -> (Vec<Contact>, Option<SyncCheckpoint>) {
    let ChangeSet {
        mut added,
        updated,
        next_checkpoint,
        ..
    } = change_set;
    added.extend(updated);
    (added, next_checkpoint)
}
