//! Reachability transition detection.
//!
//! The host environment reports raw connectivity signals (online/offline).
//! Raw signals are noisy: the same value can be reported repeatedly, and a
//! device flapping between states can fire bursts of events. This module
//! reduces the stream to the one transition the sync engine cares about:
//! offline→online, which is when queued work becomes submittable.
//!
//! Transitions to offline produce no trigger. Nothing needs to happen - the
//! durable queue already captured every write.

/// A raw connectivity signal from the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    /// The device believes it has network connectivity.
    Online,
    /// The device believes it has no network connectivity.
    Offline,
}

/// A meaningful change in connectivity, derived from raw signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The device regained connectivity. Queued work should be drained.
    CameOnline,
    /// The device lost connectivity. No action required.
    WentOffline,
}

/// Tracks perceived connectivity and detects transitions.
///
/// Starts in an unknown state: the first `Online` signal counts as a
/// [`Transition::CameOnline`] so a queue populated before the monitor started
/// still gets drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReachabilityState {
    /// No signal observed yet.
    #[default]
    Unknown,
    /// Last signal was online.
    Online,
    /// Last signal was offline.
    Offline,
}

impl ReachabilityState {
    /// Create a new state with no signal observed yet.
    pub fn new() -> Self {
        Self::Unknown
    }

    /// Observe a raw signal, returning the transition it represents, if any.
    ///
    /// Repeated signals of the same value return `None`.
    pub fn observe(&mut self, signal: Reachability) -> Option<Transition> {
        let transition = match (*self, signal) {
            (Self::Online, Reachability::Online) => None,
            (Self::Offline, Reachability::Offline) => None,
            (Self::Unknown, Reachability::Offline) => None,
            (_, Reachability::Online) => Some(Transition::CameOnline),
            (Self::Online, Reachability::Offline) => Some(Transition::WentOffline),
        };
        *self = match signal {
            Reachability::Online => Self::Online,
            Reachability::Offline => Self::Offline,
        };
        transition
    }

    /// Whether the last observed signal was online.
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}
