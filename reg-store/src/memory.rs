//! In-memory queue backend for testing.
//!
//! Not durable. Mirrors the SQLite backend's id discipline (monotonic, never
//! reused) and adds forced-failure hooks so callers can exercise their
//! storage-error paths.

use crate::{QueueStore, StorageError};
use async_trait::async_trait;
use regsync_types::{LocalId, QueueEntry, RegistrationPayload};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// In-memory queue for testing.
///
/// Clones share state, like a pool handle.
#[derive(Debug, Default, Clone)]
pub struct MemoryQueueStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    entries: BTreeMap<u64, QueueEntry>,
    fail_next_enqueue: Option<String>,
    fail_next_mark_synced: Option<String>,
}

impl MemoryQueueStore {
    /// Create an empty in-memory queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cause the next `enqueue` to fail with the given reason.
    pub fn fail_next_enqueue(&self, reason: &str) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.fail_next_enqueue = Some(reason.to_string());
    }

    /// Cause the next `mark_synced` to fail with the given reason.
    pub fn fail_next_mark_synced(&self, reason: &str) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.fail_next_mark_synced = Some(reason.to_string());
    }

    /// Total number of entries, synced or not.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("store mutex poisoned");
        inner.entries.len()
    }

    /// Whether the queue holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn current_timestamp() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl QueueStore for MemoryQueueStore {
    async fn enqueue(&self, payload: RegistrationPayload) -> Result<QueueEntry, StorageError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");

        if let Some(reason) = inner.fail_next_enqueue.take() {
            return Err(StorageError::Unavailable { reason });
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let entry = QueueEntry {
            local_id: LocalId::new(id),
            payload,
            synced: false,
            created_at: Self::current_timestamp(),
        };
        inner.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn list_unsynced(&self) -> Result<Vec<QueueEntry>, StorageError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .entries
            .values()
            .filter(|e| !e.synced)
            .cloned()
            .collect())
    }

    async fn mark_synced(&self, local_id: LocalId) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if let Some(reason) = inner.fail_next_mark_synced.take() {
            return Err(StorageError::Unavailable { reason });
        }
        if let Some(entry) = inner.entries.get_mut(&local_id.value()) {
            entry.synced = true;
        }
        Ok(())
    }

    async fn remove(&self, local_id: LocalId) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.entries.remove(&local_id.value());
        Ok(())
    }

    async fn get(&self, local_id: LocalId) -> Result<Option<QueueEntry>, StorageError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.entries.get(&local_id.value()).cloned())
    }

    async fn unsynced_count(&self) -> Result<u64, StorageError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.entries.values().filter(|e| !e.synced).count() as u64)
    }

    async fn prune_synced(&self) -> Result<u64, StorageError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let before = inner.entries.len();
        inner.entries.retain(|_, e| !e.synced);
        Ok((before - inner.entries.len()) as u64)
    }
}
