//! Error types for the sync layer.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
///
/// An expired or invalid history token is not an error: it surfaces as a
/// `reset` change set. Decoding a stored checkpoint is the caller's concern
/// and fails with [`deltacontacts_types::Error`].
#[derive(Debug, Error)]
pub enum SyncError {
    /// The caller is not authorized to read contacts.
    #[error("contact read permission denied")]
    PermissionDenied,

    /// The row source failed to answer a query.
    #[error("row source unavailable: {0}")]
    SourceUnavailable(String),

    /// The change-history store failed to answer a query.
    #[error("change history unavailable: {0}")]
    HistoryUnavailable(String),
}

impl SyncError {
    /// Returns true if repeating the whole sync call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SourceUnavailable(_) | Self::HistoryUnavailable(_))
    }
}
