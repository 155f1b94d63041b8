//! Sync pass state and outcome aggregation.
//!
//! A sync pass is one complete attempt to drain the unsynced queue. Passes
//! must never overlap: two passes submitting the same entry concurrently
//! would defeat the queue's single-flagger discipline. [`PassState`] is the
//! explicit Idle/Running value owned by each orchestrator instance - there is
//! no process-wide flag, so orchestrators in tests do not interfere.
//!
//! [`SyncReport`] aggregates per-record outcomes. Network failures and
//! explicit rejections both leave the entry queued, but they are counted
//! separately: a rejection will never succeed on blind retry and should be
//! surfaced to the operator.

use regsync_types::LocalId;
use std::fmt;

/// Whether a sync pass is currently running.
///
/// Owned by the orchestrator instance. A trigger that arrives while Running
/// is dropped, which is safe: unsynced entries persist durably and the next
/// transition re-triggers a full pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    /// No pass in flight.
    #[default]
    Idle,
    /// A pass is draining the queue.
    Running,
}

impl PassState {
    /// Try to move Idle → Running.
    ///
    /// Returns `true` if this call started the pass, `false` if one was
    /// already running (the trigger should be dropped).
    pub fn try_begin(&mut self) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Running;
                true
            }
            Self::Running => false,
        }
    }

    /// Move back to Idle at the end of a pass.
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }

    /// Whether a pass is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Outcome of submitting one queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The remote endpoint accepted the record.
    Accepted,
    /// The remote endpoint was unreachable or gave no usable response.
    /// The entry stays queued and will be retried on the next pass.
    NetworkFailure,
    /// The remote endpoint explicitly rejected the record (validation).
    /// The entry stays queued, but retrying without payload correction
    /// cannot succeed.
    Rejected,
}

/// Aggregate outcome of one sync pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Entries confirmed by the remote endpoint during this pass.
    pub succeeded: u32,
    /// Entries that failed with a network-kind error and remain queued.
    pub network_failures: u32,
    /// Entries explicitly rejected by the endpoint and remaining queued.
    pub rejections: u32,
    /// Local ids of the entries that remain queued after this pass.
    pub still_pending: Vec<LocalId>,
}

impl SyncReport {
    /// An empty report: nothing to sync.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record the outcome for one entry.
    pub fn record(&mut self, local_id: LocalId, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Accepted => self.succeeded += 1,
            RecordOutcome::NetworkFailure => {
                self.network_failures += 1;
                self.still_pending.push(local_id);
            }
            RecordOutcome::Rejected => {
                self.rejections += 1;
                self.still_pending.push(local_id);
            }
        }
    }

    /// Number of entries still queued after the pass.
    pub fn pending(&self) -> u32 {
        self.network_failures + self.rejections
    }

    /// Number of entries attempted during the pass.
    pub fn attempted(&self) -> u32 {
        self.succeeded + self.pending()
    }

    /// Whether every attempted entry was accepted.
    pub fn is_clean(&self) -> bool {
        self.pending() == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} pending ({} network, {} rejected)",
            self.succeeded,
            self.pending(),
            self.network_failures,
            self.rejections
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_starts_idle() {
        let state = PassState::default();
        assert!(!state.is_running());
    }

    #[test]
    fn try_begin_starts_a_pass() {
        let mut state = PassState::Idle;
        assert!(state.try_begin());
        assert!(state.is_running());
    }

    #[test]
    fn try_begin_while_running_is_refused() {
        let mut state = PassState::Idle;
        assert!(state.try_begin());
        assert!(!state.try_begin());
        assert!(state.is_running());
    }

    #[test]
    fn finish_allows_the_next_pass() {
        let mut state = PassState::Idle;
        assert!(state.try_begin());
        state.finish();
        assert!(state.try_begin());
    }

    #[test]
    fn empty_report_is_clean() {
        let report = SyncReport::empty();
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.pending(), 0);
        assert_eq!(report.attempted(), 0);
        assert!(report.is_clean());
    }

    #[test]
    fn report_counts_each_outcome_kind() {
        let mut report = SyncReport::empty();
        report.record(LocalId::new(1), RecordOutcome::Accepted);
        report.record(LocalId::new(2), RecordOutcome::NetworkFailure);
        report.record(LocalId::new(3), RecordOutcome::Rejected);
        report.record(LocalId::new(4), RecordOutcome::Accepted);

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.network_failures, 1);
        assert_eq!(report.rejections, 1);
        assert_eq!(report.pending(), 2);
        assert_eq!(report.attempted(), 4);
        assert!(!report.is_clean());
    }

    #[test]
    fn still_pending_lists_failed_ids_in_order() {
        let mut report = SyncReport::empty();
        report.record(LocalId::new(1), RecordOutcome::Accepted);
        report.record(LocalId::new(2), RecordOutcome::NetworkFailure);
        report.record(LocalId::new(3), RecordOutcome::Rejected);

        assert_eq!(report.still_pending, vec![LocalId::new(2), LocalId::new(3)]);
    }

    #[test]
    fn report_display_summarizes_counts() {
        let mut report = SyncReport::empty();
        report.record(LocalId::new(1), RecordOutcome::Accepted);
        report.record(LocalId::new(2), RecordOutcome::NetworkFailure);
        assert_eq!(
            report.to_string(),
            "1 succeeded, 1 pending (1 network, 0 rejected)"
        );
    }
}
