//! Identifier types for regsync.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locally assigned identifier for a queued registration.
///
/// Assigned by the durable queue at enqueue time, monotonically increasing,
/// and never reused even after the entry is deleted. Also transmitted to the
/// server as the idempotency key (`client_ref`), so a replayed submission of
/// the same logical record can be deduplicated server-side.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct LocalId(u64);

impl LocalId {
    /// Create a LocalId with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value of this LocalId.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The next identifier in the sequence.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalId({})", self.0)
    }
}

/// A server-assigned identifier for an accepted registration.
///
/// Distinct from [`LocalId`]: the server mints this on acceptance and it has
/// no relationship to the locally assigned key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegistrationId(u64);

impl RegistrationId {
    /// Create a RegistrationId with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value of this RegistrationId.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistrationId({})", self.0)
    }
}
