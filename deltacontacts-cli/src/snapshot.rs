//! JSON snapshot collaborator.
//!
//! A snapshot file stands in for a platform contact store: it holds the
//! rows (or whole records), the permission answer and canned change-history
//! answers keyed by base64 token.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use deltacontacts_sync::{
    ChangeBatch, ChangeHistoryStore, PermissionGate, RowQuery, RowSource, SyncResult,
};
use deltacontacts_types::{ContactRecord, RawFieldRow};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default = "default_true")]
    permission_granted: bool,
    #[serde(default)]
    current_token: Option<String>,
    #[serde(default)]
    rows: Vec<SnapshotRow>,
    #[serde(default)]
    records: Vec<ContactRecord>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct SnapshotRow {
    #[serde(flatten)]
    row: RawFieldRow,
    #[serde(default)]
    modified_at: i64,
}

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    token: String,
    #[serde(default)]
    added: Vec<RawFieldRow>,
    #[serde(default)]
    updated: Vec<RawFieldRow>,
    #[serde(default)]
    should_reset: bool,
    #[serde(default)]
    next_token: Option<String>,
}

/// A decoded snapshot, usable as row source, history store and gate.
#[derive(Debug, Clone)]
pub struct Snapshot {
    permission_granted: bool,
    current_token: Option<Vec<u8>>,
    rows: Vec<(RawFieldRow, i64)>,
    record_rows: Vec<RawFieldRow>,
    history: HashMap<Vec<u8>, ChangeBatch>,
}

impl Snapshot {
    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(json).context("malformed snapshot JSON")?;

        let rows = file
            .rows
            .into_iter()
            .map(|r| (r.row, r.modified_at))
            .collect();
        let record_rows = file
            .records
            .iter()
            .flat_map(ContactRecord::to_rows)
            .collect();

        let mut history = HashMap::new();
        for entry in file.history {
            let token = decode_token(&entry.token)
                .with_context(|| format!("bad history token {:?}", entry.token))?;
            let next_token = entry
                .next_token
                .as_deref()
                .map(decode_token)
                .transpose()
                .context("bad next_token")?;
            history.insert(
                token,
                ChangeBatch {
                    added: entry.added,
                    updated: entry.updated,
                    should_reset: entry.should_reset,
                    next_token,
                },
            );
        }

        let current_token = file
            .current_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(decode_token)
            .transpose()
            .context("bad current_token")?;

        Ok(Self {
            permission_granted: file.permission_granted,
            current_token,
            rows,
            record_rows,
            history,
        })
    }

    /// Reads and parses a snapshot file.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Returns true if the snapshot carries change history.
    pub fn has_history(&self) -> bool {
        self.current_token.is_some() || !self.history.is_empty()
    }

    /// Number of rows the snapshot holds, records included.
    pub fn row_count(&self) -> usize {
        self.rows.len() + self.record_rows.len()
    }
}

fn decode_token(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded.trim())?)
}

#[async_trait]
impl RowSource for Snapshot {
    async fn query(&self, query: &RowQuery) -> SyncResult<Vec<RawFieldRow>> {
        // Records count as modified at time zero.
        let mut rows: Vec<RawFieldRow> = self
            .rows
            .iter()
            .filter(|(_, modified_at)| query.since_watermark.is_none_or(|s| *modified_at > s))
            .map(|(row, _)| row.clone())
            .collect();
        if query.since_watermark.is_none() {
            rows.extend(self.record_rows.iter().cloned());
        }
        Ok(query.restrict(rows))
    }
}

#[async_trait]
impl ChangeHistoryStore for Snapshot {
    async fn fetch_changes(&self, token: &[u8]) -> SyncResult<Option<ChangeBatch>> {
        Ok(self.history.get(token).cloned())
    }

    async fn current_token(&self) -> SyncResult<Option<Vec<u8>>> {
        Ok(self.current_token.clone())
    }
}

#[async_trait]
impl PermissionGate for Snapshot {
    async fn has_read_access(&self) -> bool {
        self.permission_granted
    }
}
