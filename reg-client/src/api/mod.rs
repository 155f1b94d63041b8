//! Remote registration endpoint abstraction.
//!
//! The orchestrator talks to the school-management backend through the
//! [`RegistrationApi`] trait, so sync logic can be tested without a network
//! stack. Two implementations:
//! - [`HttpRegistrationApi`] - the real REST client
//! - [`MockRegistrationApi`] - scripted responses for testing
//!
//! Both failure kinds leave the queue entry retained for retry; they differ
//! only in how they are reported (a [`ApiError::Rejected`] cannot succeed on
//! blind retry and needs operator attention).

mod http;
mod mock;

pub use http::HttpRegistrationApi;
pub use mock::MockRegistrationApi;

use async_trait::async_trait;
use regsync_types::{CreateRegistration, RegistrationId};
use std::collections::BTreeMap;
use thiserror::Error;

/// Remote endpoint errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No usable response reached us (unreachable host, timeout, 5xx).
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint explicitly rejected the payload (4xx validation).
    #[error("registration rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Human-readable summary from the response body.
        message: String,
        /// Field-level validation detail, keyed by field name.
        fields: BTreeMap<String, String>,
    },
}

impl ApiError {
    /// Whether retrying without payload correction could ever succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Trait for the registration-creation endpoint.
///
/// The request carries the queue's local id as `client_ref`; the endpoint
/// contract requires deduplication by that key so a replayed submission
/// whose original success response was lost does not create a duplicate.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Submit one registration, returning the server-assigned identifier.
    async fn create_registration(
        &self,
        req: &CreateRegistration,
    ) -> Result<RegistrationId, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_retryable() {
        assert!(ApiError::Network("connection refused".into()).is_retryable());
    }

    #[test]
    fn rejections_are_not_retryable() {
        let err = ApiError::Rejected {
            status: 422,
            message: "validation failed".into(),
            fields: BTreeMap::new(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn error_display() {
        let err = ApiError::Rejected {
            status: 400,
            message: "bad date".into(),
            fields: BTreeMap::new(),
        };
        assert_eq!(err.to_string(), "registration rejected (400): bad date");
    }
}
