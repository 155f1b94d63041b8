//! Error types for regsync-client.

use thiserror::Error;

/// Client errors.
///
/// Per-record remote failures do not surface here - they are absorbed into
/// the pass report so one failing record never aborts the batch. A
/// `ClientError` means the pass itself could not proceed (the queue was
/// unreadable).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The durable queue failed.
    #[error("storage error: {0}")]
    Storage(#[from] regsync_store::StorageError),
}
