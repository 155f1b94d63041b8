//! # regsync-store
//!
//! The Local Durable Queue: persistent storage for pending registrations,
//! surviving process restarts.
//!
//! The queue is the single shared mutable resource of the sync engine. The
//! application writes via [`QueueStore::enqueue`]; the sync orchestrator is
//! the sole flagger (`mark_synced`) and deleter (`remove`). Correctness
//! relies on the backend's per-statement atomicity plus that single-flagger
//! discipline - no explicit row locking.
//!
//! Two backends:
//! - [`SqliteQueueStore`] - the durable backend (WAL mode, monotonic
//!   `AUTOINCREMENT` ids that are never reused)
//! - [`MemoryQueueStore`] - an in-process backend for unit tests, with
//!   forced-failure hooks

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod memory;
mod sqlite;

pub use error::StorageError;
pub use memory::MemoryQueueStore;
pub use sqlite::SqliteQueueStore;

use async_trait::async_trait;
use regsync_types::{LocalId, QueueEntry, RegistrationPayload};

/// Trait for durable queue backends.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Persist a new registration with `synced = false`.
    ///
    /// Assigns the next monotonic [`LocalId`] and returns the stored entry.
    /// Never touches the network; fails only on storage-layer errors, which
    /// are surfaced to the caller.
    async fn enqueue(&self, payload: RegistrationPayload) -> Result<QueueEntry, StorageError>;

    /// All entries with `synced = false`, in insertion order.
    ///
    /// Read-only and side-effect free. Reflects durable state, so it is
    /// correct across process restarts.
    async fn list_unsynced(&self) -> Result<Vec<QueueEntry>, StorageError>;

    /// Idempotently flag an entry as confirmed by the remote endpoint.
    ///
    /// Unknown or already-synced ids are a no-op.
    async fn mark_synced(&self, local_id: LocalId) -> Result<(), StorageError>;

    /// Idempotently delete an entry.
    ///
    /// Unknown ids are a no-op.
    async fn remove(&self, local_id: LocalId) -> Result<(), StorageError>;

    /// Look up a single entry by id.
    async fn get(&self, local_id: LocalId) -> Result<Option<QueueEntry>, StorageError>;

    /// Number of entries with `synced = false`.
    async fn unsynced_count(&self) -> Result<u64, StorageError>;

    /// Delete entries already flagged synced.
    ///
    /// Returns the number of rows deleted. Freed ids are never reassigned.
    async fn prune_synced(&self) -> Result<u64, StorageError>;
}
