//! Record-shaped contacts, as enumerated by stores that return whole
//! contacts rather than per-field rows.

use crate::row::{FieldKind, RawFieldRow};
use serde::{Deserialize, Serialize};

/// A whole contact as reported by a record-oriented store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactRecord {
    pub identifier: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

impl ContactRecord {
    /// Creates a record with the given identifier and names.
    pub fn new(
        identifier: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_phone(mut self, number: impl Into<String>) -> Self {
        self.phone_numbers.push(number.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, address: impl Into<String>) -> Self {
        self.email_addresses.push(address.into());
        self
    }

    /// Joins the non-blank name parts with a single space.
    #[must_use]
    pub fn display_name(&self) -> String {
        [self.given_name.trim(), self.family_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Flattens the record into per-field rows.
    ///
    /// A record with no phone numbers and no emails still yields one
    /// name-only row so the merger sees the contact.
    #[must_use]
    pub fn to_rows(&self) -> Vec<RawFieldRow> {
        let name = self.display_name();
        let phones = self
            .phone_numbers
            .iter()
            .map(|n| self.row(&name, FieldKind::Phone, Some(n.as_str())));
        let emails = self
            .email_addresses
            .iter()
            .map(|e| self.row(&name, FieldKind::Email, Some(e.as_str())));

        let mut rows: Vec<RawFieldRow> = phones.chain(emails).collect();
        if rows.is_empty() {
            rows.push(self.row(&name, FieldKind::Phone, None));
        }
        rows
    }

    fn row(&self, name: &str, kind: FieldKind, value: Option<&str>) -> RawFieldRow {
        RawFieldRow::new(self.identifier.as_str(), Some(name), kind, value)
    }
}
