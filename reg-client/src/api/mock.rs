//! Mock registration endpoint for testing.
//!
//! Journals every request, supports scripted failures per idempotency key,
//! injected latency, and deduplication by `client_ref` - the same contract
//! the real backend is required to honor.

use super::{ApiError, RegistrationApi};
use async_trait::async_trait;
use regsync_types::{CreateRegistration, LocalId, RegistrationId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock registration endpoint.
///
/// Clones share state, so a test can keep a handle for assertions while the
/// orchestrator owns another.
#[derive(Debug, Default)]
pub struct MockRegistrationApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    requests: Vec<CreateRegistration>,
    next_id: u64,
    assigned: HashMap<LocalId, RegistrationId>,
    fail_once: HashMap<LocalId, ApiError>,
    fail_all: Option<ApiError>,
    latency: Option<Duration>,
    in_flight: usize,
    max_in_flight: usize,
}

impl MockRegistrationApi {
    /// Create a new mock endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests received, in arrival order.
    pub fn requests(&self) -> Vec<CreateRegistration> {
        self.inner.lock().expect("mock mutex poisoned").requests.clone()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.inner.lock().expect("mock mutex poisoned").requests.len()
    }

    /// Highest number of concurrently in-flight requests observed.
    pub fn max_in_flight(&self) -> usize {
        self.inner.lock().expect("mock mutex poisoned").max_in_flight
    }

    /// Fail the next request for this `client_ref` with a network error.
    ///
    /// One-shot: a later replay of the same key succeeds.
    pub fn fail_network_once(&self, local_id: LocalId, reason: &str) {
        let mut inner = self.inner.lock().expect("mock mutex poisoned");
        inner
            .fail_once
            .insert(local_id, ApiError::Network(reason.to_string()));
    }

    /// Reject the next request for this `client_ref` with a 422 and
    /// field-level detail. One-shot.
    pub fn reject_once(&self, local_id: LocalId, field: &str, detail: &str) {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), detail.to_string());
        let mut inner = self.inner.lock().expect("mock mutex poisoned");
        inner.fail_once.insert(
            local_id,
            ApiError::Rejected {
                status: 422,
                message: "validation failed".to_string(),
                fields,
            },
        );
    }

    /// Fail every request with a network error until cleared.
    pub fn fail_all_network(&self, reason: &str) {
        let mut inner = self.inner.lock().expect("mock mutex poisoned");
        inner.fail_all = Some(ApiError::Network(reason.to_string()));
    }

    /// Stop failing every request.
    pub fn clear_failures(&self) {
        let mut inner = self.inner.lock().expect("mock mutex poisoned");
        inner.fail_all = None;
        inner.fail_once.clear();
    }

    /// Delay each request by the given duration (for overlap tests).
    pub fn set_latency(&self, latency: Duration) {
        let mut inner = self.inner.lock().expect("mock mutex poisoned");
        inner.latency = Some(latency);
    }
}

impl Clone for MockRegistrationApi {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl RegistrationApi for MockRegistrationApi {
    async fn create_registration(
        &self,
        req: &CreateRegistration,
    ) -> Result<RegistrationId, ApiError> {
        let latency = {
            let mut inner = self.inner.lock().expect("mock mutex poisoned");
            inner.requests.push(req.clone());
            inner.in_flight += 1;
            inner.max_in_flight = inner.max_in_flight.max(inner.in_flight);
            inner.latency
        };
        // The caller may cancel us mid-sleep (per-call timeout); the slot
        // must still be released or max_in_flight inflates on later calls
        let _in_flight = InFlightGuard {
            inner: Arc::clone(&self.inner),
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut inner = self.inner.lock().expect("mock mutex poisoned");

        if let Some(err) = inner.fail_all.clone() {
            return Err(err);
        }
        if let Some(err) = inner.fail_once.remove(&req.client_ref) {
            return Err(err);
        }

        // Dedupe by idempotency key, like the real endpoint must
        if let Some(id) = inner.assigned.get(&req.client_ref) {
            return Ok(*id);
        }
        inner.next_id += 1;
        let id = RegistrationId::new(1000 + inner.next_id);
        inner.assigned.insert(req.client_ref, id);
        Ok(id)
    }
}

/// Decrements the in-flight counter when a request ends, on every exit path
/// including cancellation.
struct InFlightGuard {
    inner: Arc<Mutex<Inner>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .in_flight -= 1;
    }
}
