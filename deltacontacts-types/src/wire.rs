//! JSON payloads handed across the UI boundary.

use crate::checkpoint::SyncCheckpoint;
use crate::contact::Contact;
use serde::{Deserialize, Serialize};

/// A contact as the UI layer receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireContact {
    pub id: String,
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
}

impl From<Contact> for WireContact {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            phone_numbers: contact.phone_numbers.into_vec(),
            emails: contact.emails.into_vec(),
        }
    }
}

/// The result of one sync call in wire form.
///
/// `historyToken` is an empty string when there is nothing to persist. The
/// engine never issues watermarks, so a watermark checkpoint also renders as
/// an empty token; callers track their own watermark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub contacts: Vec<WireContact>,
    pub history_token: String,
    #[serde(default)]
    pub reset: bool,
}

impl SyncResponse {
    /// Builds a response from assembled contacts and the checkpoint to persist.
    pub fn new(contacts: Vec<Contact>, checkpoint: Option<&SyncCheckpoint>, reset: bool) -> Self {
        Self {
            contacts: contacts.into_iter().map(WireContact::from).collect(),
            history_token: checkpoint
                .and_then(SyncCheckpoint::history_token_base64)
                .unwrap_or_default(),
            reset,
        }
    }

    /// Serializes to a JSON string.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
