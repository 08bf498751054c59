//! Sync checkpoints.
//!
//! A checkpoint is owned and persisted by the caller. The engine reads one
//! per call and may hand a new one back; it never mutates the input.

use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Where the previous sync left off.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncCheckpoint {
    /// Milliseconds since the Unix epoch; rows modified after it are new.
    Watermark(i64),
    /// Opaque token issued by a change-history store.
    HistoryToken(#[serde(with = "token_base64")] Vec<u8>),
}

impl SyncCheckpoint {
    /// Creates a history-token checkpoint.
    pub fn history_token(bytes: impl Into<Vec<u8>>) -> Self {
        Self::HistoryToken(bytes.into())
    }

    /// Returns the watermark, if this is a watermark checkpoint.
    #[must_use]
    pub const fn watermark(&self) -> Option<i64> {
        match self {
            Self::Watermark(ts) => Some(*ts),
            Self::HistoryToken(_) => None,
        }
    }

    /// Returns the raw token bytes, if this is a history-token checkpoint.
    #[must_use]
    pub fn token_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Watermark(_) => None,
            Self::HistoryToken(bytes) => Some(bytes),
        }
    }

    /// Encodes a history token as standard base64 for a text boundary.
    #[must_use]
    pub fn history_token_base64(&self) -> Option<String> {
        self.token_bytes().map(|bytes| STANDARD.encode(bytes))
    }

    /// Decodes a base64 history token received over a text boundary.
    ///
    /// An empty or blank string means "no checkpoint".
    pub fn from_history_token_base64(encoded: &str) -> Result<Option<Self>> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Ok(None);
        }
        let bytes = STANDARD.decode(encoded)?;
        if bytes.is_empty() {
            return Err(Error::InvalidCheckpoint("empty history token".into()));
        }
        Ok(Some(Self::HistoryToken(bytes)))
    }

    /// Encodes a watermark as 8 big-endian bytes for blob storage.
    #[must_use]
    pub fn watermark_to_bytes(watermark: i64) -> [u8; 8] {
        watermark.to_be_bytes()
    }

    /// Decodes a watermark stored by [`SyncCheckpoint::watermark_to_bytes`].
    pub fn watermark_from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; 8] = bytes.try_into().map_err(|_| {
            Error::InvalidCheckpoint(format!("watermark must be 8 bytes, got {}", bytes.len()))
        })?;
        Ok(Self::Watermark(i64::from_be_bytes(raw)))
    }
}

mod token_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
