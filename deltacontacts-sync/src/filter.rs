//! Identity filter.

use deltacontacts_types::Contact;
use tracing::debug;

/// Keeps contacts with a non-blank name or at least one phone number,
/// preserving their relative order. Email-only contacts are dropped.
pub fn filter(contacts: impl IntoIterator<Item = Contact>) -> Vec<Contact> {
    let mut dropped = 0usize;
    let kept: Vec<Contact> = contacts
        .into_iter()
        .filter(|contact| {
            let keep = contact.has_identity_signal();
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();

    if dropped > 0 {
        debug!("Dropped {} contacts without a name or phone number", dropped);
    }
    kept
}
