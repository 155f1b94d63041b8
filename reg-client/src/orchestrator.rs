//! The sync orchestrator: drains the unsynced queue against the remote
//! endpoint.
//!
//! One pass = one snapshot of `list_unsynced()`, processed strictly
//! sequentially, oldest first. Per-record outcomes are isolated: a failing
//! record is logged, left queued, and the pass continues. There is no retry
//! within a pass - a failed record waits for the next trigger, which bounds
//! a single attempt's latency and avoids hammering a downed server.
//!
//! Entries enqueued while a pass runs are not part of its snapshot; they are
//! picked up by the next pass.

use regsync_core::{PassState, RecordOutcome, SyncReport};
use regsync_store::QueueStore;
use regsync_types::CreateRegistration;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{ApiError, RegistrationApi};
use crate::error::ClientError;

/// Result of requesting a sync pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A pass ran to completion; the report aggregates per-record outcomes.
    Completed(SyncReport),
    /// A pass was already running; this trigger was dropped.
    ///
    /// Informational, not an error: unsynced entries persist durably and the
    /// next trigger runs a full pass.
    Skipped,
}

/// Drains the durable queue against the remote registration endpoint.
///
/// Each orchestrator owns its own Idle/Running pass state, so independent
/// instances (and tests) never interfere. The state is released on every
/// exit path, including panics, via a drop guard.
pub struct SyncOrchestrator<S, A> {
    store: Arc<S>,
    api: Arc<A>,
    state: Arc<Mutex<PassState>>,
    request_timeout: Duration,
}

impl<S, A> SyncOrchestrator<S, A>
where
    S: QueueStore,
    A: RegistrationApi,
{
    /// Create a new orchestrator.
    ///
    /// `request_timeout` bounds each remote call; an elapsed timeout counts
    /// as a network failure so the pass always makes forward progress and
    /// the Running state can never be held by a hung request.
    pub fn new(store: S, api: A, request_timeout: Duration) -> Self {
        Self {
            store: Arc::new(store),
            api: Arc::new(api),
            state: Arc::new(Mutex::new(PassState::Idle)),
            request_timeout,
        }
    }

    /// Whether a pass is currently running.
    pub fn is_running(&self) -> bool {
        self.lock_state().is_running()
    }

    /// Run one sync pass, or skip if a pass is already in flight.
    ///
    /// This is the single entry point for both the reachability monitor and
    /// the manual "sync now" trigger.
    pub async fn sync_pass(&self) -> Result<SyncOutcome, ClientError> {
        if !self.lock_state().try_begin() {
            tracing::debug!("sync pass already running, trigger dropped");
            return Ok(SyncOutcome::Skipped);
        }
        let _guard = PassGuard {
            state: Arc::clone(&self.state),
        };

        let entries = self.store.list_unsynced().await?;
        if entries.is_empty() {
            tracing::debug!("nothing to sync");
            return Ok(SyncOutcome::Completed(SyncReport::empty()));
        }

        tracing::info!(pending = entries.len(), "sync pass started");
        let mut report = SyncReport::empty();

        for entry in entries {
            let req = CreateRegistration {
                client_ref: entry.local_id,
                registration: entry.payload,
            };

            let result =
                tokio::time::timeout(self.request_timeout, self.api.create_registration(&req))
                    .await;

            let outcome = match result {
                Ok(Ok(registration_id)) => match self.store.mark_synced(entry.local_id).await {
                    Ok(()) => {
                        tracing::debug!(
                            local_id = %entry.local_id,
                            %registration_id,
                            "registration accepted"
                        );
                        RecordOutcome::Accepted
                    }
                    Err(e) => {
                        // Accepted remotely but the flag flip failed; the
                        // entry stays listed and the replay is deduplicated
                        // by client_ref.
                        tracing::error!(
                            local_id = %entry.local_id,
                            error = %e,
                            "accepted remotely but could not flag locally"
                        );
                        RecordOutcome::NetworkFailure
                    }
                },
                Ok(Err(ApiError::Network(reason))) => {
                    tracing::warn!(
                        local_id = %entry.local_id,
                        %reason,
                        "registration submission failed, will retry next pass"
                    );
                    RecordOutcome::NetworkFailure
                }
                Ok(Err(ApiError::Rejected {
                    status,
                    message,
                    fields,
                })) => {
                    tracing::warn!(
                        local_id = %entry.local_id,
                        status,
                        %message,
                        ?fields,
                        "registration rejected, needs correction before retry"
                    );
                    RecordOutcome::Rejected
                }
                Err(_elapsed) => {
                    tracing::warn!(
                        local_id = %entry.local_id,
                        timeout_secs = self.request_timeout.as_secs(),
                        "registration submission timed out, will retry next pass"
                    );
                    RecordOutcome::NetworkFailure
                }
            };

            report.record(entry.local_id, outcome);
        }

        tracing::info!(%report, "sync pass complete");
        Ok(SyncOutcome::Completed(report))
    }

    /// The durable queue this orchestrator drains.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The remote endpoint client (for testing).
    pub fn api(&self) -> &A {
        &self.api
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, PassState> {
        // A pass that panicked must not wedge the guard for the process
        // lifetime; recover the inner value.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Resets the pass state to Idle when a pass ends, on every exit path.
struct PassGuard {
    state: Arc<Mutex<PassState>>,
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .finish();
    }
}
