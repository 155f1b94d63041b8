//! Error types for regsync-store.

/// Storage layer errors.
///
/// An error from `enqueue` means the local-first guarantee was not met and
/// must be surfaced to the submitter immediately; it is never swallowed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Payload (de)serialization failed.
    #[error("payload codec error: {0}")]
    Codec(#[from] regsync_types::CodecError),

    /// The backing store is unavailable (quota exceeded, volume gone).
    #[error("storage unavailable: {reason}")]
    Unavailable {
        /// Why the store could not be used.
        reason: String,
    },

    /// A stored row could not be interpreted.
    #[error("corrupt queue row {local_id}: {reason}")]
    CorruptRow {
        /// The row's local id.
        local_id: u64,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
