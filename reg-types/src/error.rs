//! Error types for regsync-types.

use thiserror::Error;

/// Errors from (de)serializing payloads and wire bodies.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// JSON deserialization failed.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = crate::RegistrationPayload::from_json("nope").unwrap_err();
        assert!(err.to_string().starts_with("deserialization failed"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodecError>();
    }
}
