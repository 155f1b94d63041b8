//! The queue entry: one locally persisted, not-yet-confirmed submission.

use serde::{Deserialize, Serialize};

use crate::{LocalId, RegistrationPayload};

/// One registration held by the durable queue.
///
/// Created when the form is submitted (always local-first, even with
/// connectivity). Only the sync orchestrator flips `synced` or deletes the
/// entry, and only after a confirmed remote acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Queue-assigned identifier, monotonic and never reused.
    pub local_id: LocalId,
    /// The registration record to submit.
    pub payload: RegistrationPayload,
    /// Whether the remote endpoint has confirmed acceptance.
    pub synced: bool,
    /// Unix timestamp of local persistence.
    pub created_at: i64,
}

impl QueueEntry {
    /// Whether this entry still needs to be submitted.
    pub fn is_pending(&self) -> bool {
        !self.synced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Guardian;

    fn entry(synced: bool) -> QueueEntry {
        QueueEntry {
            local_id: LocalId::new(1),
            payload: RegistrationPayload {
                first_name: "Ada".into(),
                last_name: "Obi".into(),
                date_of_birth: "2013-04-02".into(),
                class_applied: "JSS1".into(),
                guardian: Guardian {
                    name: "Ngozi Obi".into(),
                    phone: "+2348012345678".into(),
                    email: None,
                },
                scores: vec![],
            },
            synced,
            created_at: 1_705_000_000,
        }
    }

    #[test]
    fn pending_tracks_synced_flag() {
        assert!(entry(false).is_pending());
        assert!(!entry(true).is_pending());
    }
}
