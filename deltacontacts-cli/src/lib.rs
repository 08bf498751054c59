//! Command-line runner for the delta-contacts sync engine.
//!
//! Plugs a JSON [`Snapshot`] in as every collaborator and renders the sync
//! result in the wire shape a UI layer consumes.

pub mod snapshot;

pub use snapshot::Snapshot;

use anyhow::{Context, Result};
use deltacontacts_sync::{ContactSyncEngine, SyncConfig};
use deltacontacts_types::{SyncCheckpoint, SyncResponse};
use std::sync::Arc;
use tracing::info;

/// Builds the checkpoint from the `--watermark` / `--token` arguments.
///
/// A watermark wins over a token. A blank token means no checkpoint.
pub fn parse_checkpoint(
    watermark: Option<i64>,
    token: Option<&str>,
) -> Result<Option<SyncCheckpoint>> {
    match (watermark, token) {
        (Some(ts), _) => Ok(Some(SyncCheckpoint::Watermark(ts))),
        (None, Some(token)) => {
            SyncCheckpoint::from_history_token_base64(token).context("invalid --token")
        }
        (None, None) => Ok(None),
    }
}

/// Runs one sync against a snapshot.
pub async fn run_sync(
    snapshot: Snapshot,
    checkpoint: Option<SyncCheckpoint>,
    config: SyncConfig,
) -> Result<SyncResponse> {
    let snapshot = Arc::new(snapshot);
    let mut engine = ContactSyncEngine::new(config, snapshot.clone(), snapshot.clone());
    if snapshot.has_history() {
        engine = engine.with_history(snapshot.clone());
    }

    info!("Syncing {} snapshot rows", snapshot.row_count());
    let outcome = engine.sync(checkpoint.as_ref()).await?;
    Ok(SyncResponse::new(
        outcome.contacts,
        outcome.checkpoint.as_ref(),
        outcome.reset,
    ))
}
