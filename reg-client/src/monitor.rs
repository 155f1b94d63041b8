//! Network reachability monitoring.
//!
//! A [`ReachabilitySignal`] is any source of online/offline observations,
//! delivered over a `tokio::sync::watch` channel. The monitor task folds the
//! raw observations through [`ReachabilityState`] so only real offline to
//! online transitions trigger a sync pass; repeated "still online" readings
//! are absorbed.

use regsync_core::{Reachability, ReachabilityState, Transition};
use regsync_store::QueueStore;
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::RegistrationApi;
use crate::orchestrator::SyncOrchestrator;

/// A source of reachability observations.
///
/// Implementations wrap whatever the platform provides (OS connectivity
/// callbacks, a periodic probe against the server). The watch channel keeps
/// only the latest value, so a burst of flaps collapses to the final state.
pub trait ReachabilitySignal {
    /// Subscribe to the stream of observations.
    fn subscribe(&self) -> watch::Receiver<Reachability>;
}

/// A manually driven reachability signal.
///
/// Production code feeds this from platform connectivity callbacks; tests
/// drive it directly with [`set_online`](WatchSignal::set_online) and
/// [`set_offline`](WatchSignal::set_offline).
#[derive(Debug)]
pub struct WatchSignal {
    tx: watch::Sender<Reachability>,
}

impl WatchSignal {
    /// Create a signal with an initial observation.
    pub fn new(initial: Reachability) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Report that the network is reachable.
    pub fn set_online(&self) {
        self.tx.send_replace(Reachability::Online);
    }

    /// Report that the network is unreachable.
    pub fn set_offline(&self) {
        self.tx.send_replace(Reachability::Offline);
    }
}

impl ReachabilitySignal for WatchSignal {
    fn subscribe(&self) -> watch::Receiver<Reachability> {
        self.tx.subscribe()
    }
}

/// Spawn the monitor task.
///
/// The task observes the signal and runs a sync pass whenever the device
/// comes back online. It exits when the signal's sender is dropped.
///
/// Returns a handle that can be used to abort the task.
pub fn spawn_monitor<S, A>(
    signal: &impl ReachabilitySignal,
    orchestrator: Arc<SyncOrchestrator<S, A>>,
) -> tokio::task::JoinHandle<()>
where
    S: QueueStore + 'static,
    A: RegistrationApi + 'static,
{
    let mut rx = signal.subscribe();
    tokio::spawn(async move {
        let mut state = ReachabilityState::default();

        // The current value counts as the first observation, so a monitor
        // started while already online syncs anything queued offline.
        let initial = *rx.borrow_and_update();
        if let Some(transition) = state.observe(initial) {
            handle_transition(transition, &orchestrator).await;
        }

        while rx.changed().await.is_ok() {
            let observed = *rx.borrow_and_update();
            if let Some(transition) = state.observe(observed) {
                handle_transition(transition, &orchestrator).await;
            }
        }
        tracing::debug!("reachability signal closed, monitor stopping");
    })
}

async fn handle_transition<S, A>(transition: Transition, orchestrator: &SyncOrchestrator<S, A>)
where
    S: QueueStore,
    A: RegistrationApi,
{
    match transition {
        Transition::CameOnline => {
            tracing::info!("network restored, starting sync pass");
            if let Err(e) = orchestrator.sync_pass().await {
                tracing::error!(error = %e, "sync pass failed");
            }
        }
        Transition::WentOffline => {
            tracing::info!("network lost, queueing locally until restored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockRegistrationApi;
    use regsync_store::MemoryQueueStore;
    use regsync_types::{Guardian, RegistrationPayload};
    use std::time::Duration;

    fn make_payload() -> RegistrationPayload {
        RegistrationPayload {
            first_name: "Amina".into(),
            last_name: "Bello".into(),
            date_of_birth: "2012-11-20".into(),
            class_applied: "JSS2".into(),
            guardian: Guardian {
                name: "Musa Bello".into(),
                phone: "+2348098765432".into(),
                email: Some("musa@example.com".into()),
            },
            scores: vec![],
        }
    }

    async fn wait_for_drain(store: &MemoryQueueStore) {
        for _ in 0..100 {
            if store.unsynced_count().await.unwrap() == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("queue never drained");
    }

    #[tokio::test]
    async fn coming_online_triggers_a_sync_pass() {
        let store = MemoryQueueStore::new();
        let api = MockRegistrationApi::new();
        store.enqueue(make_payload()).await.unwrap();

        let orchestrator = Arc::new(SyncOrchestrator::new(
            store.clone(),
            api.clone(),
            Duration::from_secs(5),
        ));
        let signal = WatchSignal::new(Reachability::Offline);
        let _monitor = spawn_monitor(&signal, orchestrator);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(api.request_count(), 0);

        signal.set_online();
        wait_for_drain(&store).await;
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn monitor_started_online_syncs_backlog() {
        let store = MemoryQueueStore::new();
        let api = MockRegistrationApi::new();
        store.enqueue(make_payload()).await.unwrap();

        let orchestrator = Arc::new(SyncOrchestrator::new(
            store.clone(),
            api.clone(),
            Duration::from_secs(5),
        ));
        let signal = WatchSignal::new(Reachability::Online);
        let _monitor = spawn_monitor(&signal, orchestrator);

        wait_for_drain(&store).await;
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn repeated_online_reports_do_not_retrigger() {
        let store = MemoryQueueStore::new();
        let api = MockRegistrationApi::new();
        store.enqueue(make_payload()).await.unwrap();

        let orchestrator = Arc::new(SyncOrchestrator::new(
            store.clone(),
            api.clone(),
            Duration::from_secs(5),
        ));
        let signal = WatchSignal::new(Reachability::Offline);
        let _monitor = spawn_monitor(&signal, orchestrator);

        signal.set_online();
        wait_for_drain(&store).await;

        signal.set_online();
        signal.set_online();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Still exactly one submission: nothing new was queued and the
        // duplicate reports were absorbed
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn each_recovery_runs_a_fresh_pass() {
        let store = MemoryQueueStore::new();
        let api = MockRegistrationApi::new();

        let orchestrator = Arc::new(SyncOrchestrator::new(
            store.clone(),
            api.clone(),
            Duration::from_secs(5),
        ));
        let signal = WatchSignal::new(Reachability::Offline);
        let _monitor = spawn_monitor(&signal, orchestrator);

        store.enqueue(make_payload()).await.unwrap();
        signal.set_online();
        wait_for_drain(&store).await;
        assert_eq!(api.request_count(), 1);

        signal.set_offline();
        store.enqueue(make_payload()).await.unwrap();
        signal.set_online();
        wait_for_drain(&store).await;
        assert_eq!(api.request_count(), 2);
    }

    #[tokio::test]
    async fn monitor_exits_when_signal_dropped() {
        let store = MemoryQueueStore::new();
        let api = MockRegistrationApi::new();
        let orchestrator = Arc::new(SyncOrchestrator::new(store, api, Duration::from_secs(5)));

        let signal = WatchSignal::new(Reachability::Offline);
        let monitor = spawn_monitor(&signal, orchestrator);
        drop(signal);

        tokio::time::timeout(Duration::from_secs(1), monitor)
            .await
            .expect("monitor should stop when the signal is dropped")
            .unwrap();
    }
}
