//! Single-contact pick path.
//!
//! A UI picker returns at most one already well-formed contact. It skips the
//! merger and the identity filter.

use crate::phone;
use deltacontacts_types::Contact;

/// Builds the contact for a picked phone entry.
///
/// Returns `None` when the pick carries no id, no name and no usable number.
#[must_use]
pub fn picked_contact(
    contact_id: Option<&str>,
    display_name: Option<&str>,
    number: Option<&str>,
) -> Option<Contact> {
    let name = display_name.unwrap_or_default();
    let normalized = number.and_then(phone::normalize);

    if contact_id.is_none() && name.is_empty() && normalized.is_none() {
        return None;
    }

    let mut contact = Contact::new(contact_id.unwrap_or_default(), name);
    if let Some(normalized) = normalized {
        contact.phone_numbers.insert(normalized);
    }
    Some(contact)
}
