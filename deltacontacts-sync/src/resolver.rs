//! Sync strategy selection.
//!
//! The checkpoint type picks the strategy: nothing or a watermark means a
//! full scan, a history token means a differential fetch. What a
//! differential answer means is decided by [`classify`].

use crate::source::ChangeBatch;
use deltacontacts_types::SyncCheckpoint;

/// How one sync call fetches its contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Read every row, optionally only owners modified after a watermark.
    FullScan { since_watermark: Option<i64> },
    /// Ask the change-history store for changes since a token.
    Differential { token: Vec<u8> },
}

/// Picks the strategy for a checkpoint.
///
/// A watermark only narrows the scan when it is positive.
#[must_use]
pub fn resolve(checkpoint: Option<&SyncCheckpoint>) -> Strategy {
    match checkpoint {
        None => Strategy::FullScan {
            since_watermark: None,
        },
        Some(SyncCheckpoint::Watermark(ts)) => Strategy::FullScan {
            since_watermark: (*ts > 0).then_some(*ts),
        },
        Some(SyncCheckpoint::HistoryToken(token)) => Strategy::Differential {
            token: token.clone(),
        },
    }
}

/// What a differential answer tells the engine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaOutcome {
    /// Nothing available for the token; keep the existing checkpoint.
    NoChanges,
    /// The token is stale; rescan and replace.
    Reset,
    /// Apply these changes.
    Changes(ChangeBatch),
}

/// Classifies a change-history answer.
#[must_use]
pub fn classify(answer: Option<ChangeBatch>) -> DeltaOutcome {
    match answer {
        None => DeltaOutcome::NoChanges,
        Some(batch) if batch.should_reset => DeltaOutcome::Reset,
        Some(batch) => DeltaOutcome::Changes(batch),
    }
}
