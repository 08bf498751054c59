//! Collaborator interfaces.
//!
//! The engine does no I/O of its own. A platform layer supplies rows,
//! change history and the permission check through these traits.

use crate::error::SyncResult;
use async_trait::async_trait;
use deltacontacts_types::{ContactRecord, FieldKind, RawFieldRow};
use std::collections::BTreeSet;
use tracing::debug;

/// What a row source is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    /// Field kinds to return.
    pub field_kinds: BTreeSet<FieldKind>,
    /// Only rows whose owner was modified after this instant (ms since epoch).
    pub since_watermark: Option<i64>,
}

impl RowQuery {
    /// Returns true if a row of the given kind was requested.
    #[must_use]
    pub fn wants(&self, kind: FieldKind) -> bool {
        self.field_kinds.contains(&kind)
    }

    /// Applies the requested kinds to rows that were not pre-filtered.
    ///
    /// A row of an unrequested kind loses its value but still carries its
    /// owner and display name, so a named contact survives even when none of
    /// its fields were asked for.
    #[must_use]
    pub fn restrict(&self, rows: Vec<RawFieldRow>) -> Vec<RawFieldRow> {
        rows.into_iter()
            .map(|mut row| {
                if row.value.is_some() && !self.wants(row.field_kind) {
                    row.value = None;
                }
                row
            })
            .collect()
    }
}

/// Supplies raw field rows.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Returns the rows matching `query`, in source order.
    ///
    /// Rows of unrequested kinds are either omitted or returned without a
    /// value, as [`RowQuery::restrict`] leaves them.
    ///
    /// Fails with `PermissionDenied` when unauthorized and
    /// `SourceUnavailable` on I/O failure.
    async fn query(&self, query: &RowQuery) -> SyncResult<Vec<RawFieldRow>>;
}

/// One answer from a change-history store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeBatch {
    /// Rows of contacts added since the token.
    pub added: Vec<RawFieldRow>,
    /// Rows of contacts updated since the token.
    pub updated: Vec<RawFieldRow>,
    /// The token can no longer be honored; the caller must rescan.
    pub should_reset: bool,
    /// Token to resume from next time.
    pub next_token: Option<Vec<u8>>,
}

impl ChangeBatch {
    /// Builds a batch from record-shaped changes.
    #[must_use]
    pub fn from_records(
        added: &[ContactRecord],
        updated: &[ContactRecord],
        next_token: Option<Vec<u8>>,
    ) -> Self {
        Self {
            added: added.iter().flat_map(ContactRecord::to_rows).collect(),
            updated: updated.iter().flat_map(ContactRecord::to_rows).collect(),
            should_reset: false,
            next_token,
        }
    }

    /// A batch that tells the caller to rescan.
    #[must_use]
    pub fn reset() -> Self {
        Self {
            should_reset: true,
            ..Default::default()
        }
    }
}

/// Answers differential queries against an opaque history token.
#[async_trait]
pub trait ChangeHistoryStore: Send + Sync {
    /// Returns the changes since `token`, or `None` when no changes are
    /// available for it.
    async fn fetch_changes(&self, token: &[u8]) -> SyncResult<Option<ChangeBatch>>;

    /// Returns the token for the current moment, if the store issues one.
    async fn current_token(&self) -> SyncResult<Option<Vec<u8>>>;
}

/// Reports whether the caller may read contacts.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    async fn has_read_access(&self) -> bool;
}

/// Enumerates whole contact records.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    async fn enumerate(&self) -> SyncResult<Vec<ContactRecord>>;
}

/// Adapts a [`RecordProvider`] into a [`RowSource`].
///
/// Records carry no modification time, so a watermark in the query is
/// ignored and every record is returned. Fields of unrequested kinds are
/// reduced to name-only rows.
pub struct RecordRowSource<P> {
    provider: P,
}

impl<P: RecordProvider> RecordRowSource<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P: RecordProvider> RowSource for RecordRowSource<P> {
    async fn query(&self, query: &RowQuery) -> SyncResult<Vec<RawFieldRow>> {
        if query.since_watermark.is_some() {
            debug!("Record source ignores watermark, enumerating all records");
        }
        let records = self.provider.enumerate().await?;
        Ok(query.restrict(records.iter().flat_map(ContactRecord::to_rows).collect()))
    }
}
