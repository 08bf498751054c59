//! Sync engine: runs one fetch per call against caller-supplied
//! collaborators.
//!
//! The engine holds no state between calls. The checkpoint is read-only
//! input and the new one is returned; the caller persists it. Overlapping
//! calls are independent.

use crate::assemble::{assemble, ChangeSet};
use crate::error::{SyncError, SyncResult};
use crate::filter::filter;
use crate::merge::merge;
use crate::resolver::{classify, resolve, DeltaOutcome, Strategy};
use crate::source::{ChangeHistoryStore, PermissionGate, RowQuery, RowSource};
use deltacontacts_types::{Contact, FieldKind, SyncCheckpoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Field kinds requested from the row source.
    pub field_kinds: BTreeSet<FieldKind>,
    /// Push a positive watermark down to the row source.
    pub watermark_prefilter: bool,
    /// Ask the history store for the current token after a full scan.
    pub issue_history_tokens: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            field_kinds: [FieldKind::Phone, FieldKind::Email].into_iter().collect(),
            watermark_prefilter: true,
            issue_history_tokens: true,
        }
    }
}

/// The assembled result of one sync call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Added contacts followed by updated contacts.
    pub contacts: Vec<Contact>,
    /// Checkpoint to persist. `None` means keep the existing one.
    pub checkpoint: Option<SyncCheckpoint>,
    /// The contacts replace the caller's state instead of merging into it.
    pub reset: bool,
}

/// The contact sync engine.
pub struct ContactSyncEngine {
    config: SyncConfig,
    rows: Arc<dyn RowSource>,
    gate: Arc<dyn PermissionGate>,
    history: Option<Arc<dyn ChangeHistoryStore>>,
}

impl ContactSyncEngine {
    /// Creates an engine without change-history support.
    pub fn new(
        config: SyncConfig,
        rows: Arc<dyn RowSource>,
        gate: Arc<dyn PermissionGate>,
    ) -> Self {
        Self {
            config,
            rows,
            gate,
            history: None,
        }
    }

    /// Adds a change-history store, enabling token checkpoints.
    #[must_use]
    pub fn with_history(mut self, history: Arc<dyn ChangeHistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns true if token checkpoints are supported.
    pub fn supports_history_tokens(&self) -> bool {
        self.history.is_some()
    }

    /// Runs one sync and assembles the result.
    pub async fn sync(&self, checkpoint: Option<&SyncCheckpoint>) -> SyncResult<SyncOutcome> {
        let change_set = self.fetch_changes(checkpoint).await?;
        let reset = change_set.reset;
        let (contacts, checkpoint) = assemble(change_set);
        info!(
            "Sync produced {} contacts (reset: {}, checkpoint: {})",
            contacts.len(),
            reset,
            checkpoint.is_some()
        );
        Ok(SyncOutcome {
            contacts,
            checkpoint,
            reset,
        })
    }

    /// Runs one sync and returns the unassembled change set.
    pub async fn fetch_changes(
        &self,
        checkpoint: Option<&SyncCheckpoint>,
    ) -> SyncResult<ChangeSet> {
        if !self.gate.has_read_access().await {
            warn!("Contact read permission not granted");
            return Err(SyncError::PermissionDenied);
        }

        match resolve(checkpoint) {
            Strategy::FullScan { since_watermark } => {
                self.full_scan(since_watermark, false).await
            }
            Strategy::Differential { token } => self.differential(&token).await,
        }
    }

    async fn differential(&self, token: &[u8]) -> SyncResult<ChangeSet> {
        let Some(history) = &self.history else {
            warn!("History token supplied but no change history available, rescanning");
            return self.full_scan(None, true).await;
        };

        match classify(history.fetch_changes(token).await?) {
            DeltaOutcome::NoChanges => {
                debug!("No changes available for history token");
                Ok(ChangeSet::empty())
            }
            DeltaOutcome::Reset => {
                info!("Change history requested reset, rescanning");
                self.full_scan(None, true).await
            }
            DeltaOutcome::Changes(batch) => {
                let kinds = self.row_query(None);
                let added = filter(merge(kinds.restrict(batch.added)));
                let updated = filter(merge(kinds.restrict(batch.updated)));
                debug!(
                    "Differential fetch: {} added, {} updated",
                    added.len(),
                    updated.len()
                );
                Ok(ChangeSet {
                    added,
                    updated,
                    next_checkpoint: batch.next_token.map(SyncCheckpoint::HistoryToken),
                    reset: false,
                })
            }
        }
    }

    async fn full_scan(&self, since_watermark: Option<i64>, reset: bool) -> SyncResult<ChangeSet> {
        let query = self.row_query(since_watermark);
        debug!("Full scan: {:?}", query);

        let rows = self.rows.query(&query).await?;
        let added = filter(merge(rows));

        Ok(ChangeSet {
            added,
            updated: Vec::new(),
            next_checkpoint: self.current_checkpoint().await,
            reset,
        })
    }

    fn row_query(&self, since_watermark: Option<i64>) -> RowQuery {
        RowQuery {
            field_kinds: self.config.field_kinds.clone(),
            since_watermark: since_watermark.filter(|_| self.config.watermark_prefilter),
        }
    }

    async fn current_checkpoint(&self) -> Option<SyncCheckpoint> {
        if !self.config.issue_history_tokens {
            return None;
        }
        let history = self.history.as_ref()?;
        match history.current_token().await {
            Ok(token) => token.map(SyncCheckpoint::HistoryToken),
            Err(e) => {
                warn!("Failed to read current history token: {}", e);
                None
            }
        }
    }
}
