//! In-memory collaborators.
//!
//! Used by tests and by hosts that already hold a contact snapshot in memory.

use crate::error::{SyncError, SyncResult};
use crate::source::{ChangeBatch, ChangeHistoryStore, PermissionGate, RowQuery, RowSource};
use async_trait::async_trait;
use deltacontacts_types::RawFieldRow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// A row with the modification time of its owner.
#[derive(Debug, Clone)]
struct StoredRow {
    row: RawFieldRow,
    modified_at: i64,
}

/// Row source backed by a vector of rows.
#[derive(Debug)]
pub struct InMemoryRowSource {
    rows: RwLock<Vec<StoredRow>>,
    available: AtomicBool,
    queries: AtomicUsize,
}

impl InMemoryRowSource {
    /// Creates an empty, available source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Creates a source holding `rows`, all modified at time zero.
    #[must_use]
    pub fn with_rows(rows: impl IntoIterator<Item = RawFieldRow>) -> Self {
        let stored = rows
            .into_iter()
            .map(|row| StoredRow { row, modified_at: 0 })
            .collect();
        Self {
            rows: RwLock::new(stored),
            available: AtomicBool::new(true),
            queries: AtomicUsize::new(0),
        }
    }

    /// Appends a row whose owner was modified at `modified_at`.
    pub async fn insert(&self, row: RawFieldRow, modified_at: i64) {
        self.rows.write().await.push(StoredRow { row, modified_at });
    }

    /// Makes subsequent queries fail with `SourceUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of queries answered or refused so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryRowSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RowSource for InMemoryRowSource {
    async fn query(&self, query: &RowQuery) -> SyncResult<Vec<RawFieldRow>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return Err(SyncError::SourceUnavailable("in-memory source offline".into()));
        }

        let rows = self.rows.read().await;
        Ok(query.restrict(
            rows.iter()
                .filter(|stored| {
                    query
                        .since_watermark
                        .is_none_or(|since| stored.modified_at > since)
                })
                .map(|stored| stored.row.clone())
                .collect(),
        ))
    }
}

/// Change-history store backed by a token-to-answer map.
///
/// Tokens without a registered answer report no changes.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    answers: RwLock<HashMap<Vec<u8>, ChangeBatch>>,
    current: RwLock<Option<Vec<u8>>>,
    requested: RwLock<Vec<Vec<u8>>>,
}

impl InMemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token handed out after a full scan.
    pub async fn set_current_token(&self, token: Option<Vec<u8>>) {
        *self.current.write().await = token;
    }

    /// Registers the answer for `token`.
    pub async fn set_changes(&self, token: impl Into<Vec<u8>>, batch: ChangeBatch) {
        self.answers.write().await.insert(token.into(), batch);
    }

    /// Tokens asked about so far, in order.
    pub async fn requested_tokens(&self) -> Vec<Vec<u8>> {
        self.requested.read().await.clone()
    }
}

#[async_trait]
impl ChangeHistoryStore for InMemoryHistoryStore {
    async fn fetch_changes(&self, token: &[u8]) -> SyncResult<Option<ChangeBatch>> {
        self.requested.write().await.push(token.to_vec());
        Ok(self.answers.read().await.get(token).cloned())
    }

    async fn current_token(&self) -> SyncResult<Option<Vec<u8>>> {
        Ok(self.current.read().await.clone())
    }
}

/// Permission gate with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissionGate(bool);

impl StaticPermissionGate {
    #[must_use]
    pub const fn granted() -> Self {
        Self(true)
    }

    #[must_use]
    pub const fn denied() -> Self {
        Self(false)
    }
}

#[async_trait]
impl PermissionGate for StaticPermissionGate {
    async fn has_read_access(&self) -> bool {
        self.0
    }
}
