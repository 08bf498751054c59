//! Field merger. Folds per-field rows into one contact per owner.
//!
//! A single pass over the rows, in source order. Owners appear in the output
//! in the order of their first row. The accumulator lives for one call only.

use crate::phone;
use deltacontacts_types::{Contact, FieldKind, RawFieldRow};
use std::collections::HashMap;
use tracing::debug;

/// Incremental fold of rows into contacts.
#[derive(Debug, Default)]
pub struct FieldMerger {
    contacts: Vec<Contact>,
    index: HashMap<String, usize>,
    rows_seen: usize,
    rows_skipped: usize,
}

impl FieldMerger {
    /// Creates an empty merger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one row into its owner's contact.
    pub fn push(&mut self, row: RawFieldRow) {
        self.rows_seen += 1;

        if row.owner_id.trim().is_empty() {
            self.rows_skipped += 1;
            debug!("Skipping {} row without owner id", row.field_kind);
            return;
        }

        let RawFieldRow {
            owner_id,
            display_name,
            field_kind,
            value,
        } = row;
        let display_name = display_name.unwrap_or_default();

        let slot = match self.index.get(&owner_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.contacts.len();
                self.contacts
                    .push(Contact::new(owner_id.clone(), display_name.clone()));
                self.index.insert(owner_id, slot);
                slot
            }
        };
        let contact = &mut self.contacts[slot];

        // First non-blank name sticks.
        if contact.name.trim().is_empty() && !display_name.trim().is_empty() {
            contact.name = display_name;
        }

        let Some(value) = value else {
            return;
        };

        match field_kind {
            FieldKind::Phone => {
                if let Some(normalized) = phone::normalize(&value) {
                    contact.phone_numbers.insert(normalized);
                }
            }
            FieldKind::Email => {
                if !value.trim().is_empty() {
                    contact.emails.insert(value);
                }
            }
        }
    }

    /// Number of rows folded so far, including skipped ones.
    #[must_use]
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Number of rows skipped because they had no owner.
    #[must_use]
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }

    /// Number of distinct owners seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Returns the contacts in first-occurrence order.
    #[must_use]
    pub fn finish(self) -> Vec<Contact> {
        debug!(
            rows = self.rows_seen,
            skipped = self.rows_skipped,
            contacts = self.contacts.len(),
            "Merged field rows"
        );
        self.contacts
    }
}

impl Extend<RawFieldRow> for FieldMerger {
    fn extend<I: IntoIterator<Item = RawFieldRow>>(&mut self, rows: I) {
        for row in rows {
            self.push(row);
        }
    }
}

/// Folds rows into one contact per owner, in first-occurrence order.
pub fn merge(rows: impl IntoIterator<Item = RawFieldRow>) -> Vec<Contact> {
    let mut merger = FieldMerger::new();
    merger.extend(rows);
    merger.finish()
}
