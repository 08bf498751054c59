//! Aggregated contacts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// An insertion-ordered set of strings.
///
/// Inserting a value that is already present is a no-op and never reorders
/// the set. Serializes as a plain sequence.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value. Returns true if it was not already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates values in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Returns the values in first-seen order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl PartialEq for OrderedSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for OrderedSet {}

impl<S: Into<String>> FromIterator<S> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl Serialize for OrderedSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OrderedSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

/// A contact folded from one or more field rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable per-device identifier. Never empty for merged contacts.
    pub id: String,
    /// Display name, possibly empty.
    pub name: String,
    /// Normalized phone numbers in first-seen order.
    pub phone_numbers: OrderedSet,
    /// Email addresses, verbatim, in first-seen order.
    pub emails: OrderedSet,
}

impl Contact {
    /// Creates a contact with no phone numbers or emails.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone_numbers: OrderedSet::new(),
            emails: OrderedSet::new(),
        }
    }

    /// Returns true if the contact has a non-blank name or at least one
    /// phone number. Emails alone do not identify a contact.
    #[must_use]
    pub fn has_identity_signal(&self) -> bool {
        !self.name.trim().is_empty() || !self.phone_numbers.is_empty()
    }
}
