//! REST wire bodies for the registration endpoint.
//!
//! The request carries `client_ref`, the queue's [`LocalId`], as an
//! idempotency key. The endpoint is expected to deduplicate by it: a replay
//! of an already-committed submission (e.g. the success response was lost)
//! must return the existing record instead of creating a duplicate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{LocalId, RegistrationId, RegistrationPayload};

/// Request body for `POST /registrations/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRegistration {
    /// Client-generated idempotency key (the queue's local id).
    pub client_ref: LocalId,
    /// The registration record.
    pub registration: RegistrationPayload,
}

/// Success response body: the server-assigned identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRegistration {
    /// Server-assigned identifier for the accepted registration.
    pub id: RegistrationId,
}

/// Structured 4xx rejection body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RejectionBody {
    /// Human-readable summary of the rejection.
    #[serde(default)]
    pub error: String,
    /// Field-level validation detail, keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}
