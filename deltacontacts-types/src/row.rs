//! Per-field rows produced by a row source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of fact a row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Phone,
    Email,
}

impl FieldKind {
    /// Returns the platform data-kind string a row source filters on.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Phone => "vnd.android.cursor.item/phone_v2",
            Self::Email => "vnd.android.cursor.item/email_v2",
        }
    }

    /// Looks a kind up by its platform data-kind string.
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        [Self::Phone, Self::Email]
            .into_iter()
            .find(|kind| kind.mime_type() == mime)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phone => f.write_str("phone"),
            Self::Email => f.write_str("email"),
        }
    }
}

/// One phone or email fact about a contact, denormalized with the owner's
/// display name.
///
/// Rows only live for the duration of one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFieldRow {
    /// Identifier of the owning contact. Empty means the row cannot be attributed.
    pub owner_id: String,
    /// Display name of the owner as reported on this row.
    #[serde(default)]
    pub display_name: Option<String>,
    /// What `value` holds.
    pub field_kind: FieldKind,
    /// Raw phone number or email address.
    #[serde(default)]
    pub value: Option<String>,
}

impl RawFieldRow {
    /// Creates a row from its parts.
    pub fn new(
        owner_id: impl Into<String>,
        display_name: Option<&str>,
        field_kind: FieldKind,
        value: Option<&str>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            display_name: display_name.map(str::to_owned),
            field_kind,
            value: value.map(str::to_owned),
        }
    }

    /// Creates a phone row.
    pub fn phone(owner_id: impl Into<String>, display_name: &str, number: &str) -> Self {
        Self::new(owner_id, Some(display_name), FieldKind::Phone, Some(number))
    }

    /// Creates an email row.
    pub fn email(owner_id: impl Into<String>, display_name: &str, address: &str) -> Self {
        Self::new(owner_id, Some(display_name), FieldKind::Email, Some(address))
    }
}
