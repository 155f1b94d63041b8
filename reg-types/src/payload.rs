//! Registration payload types.
//!
//! The payload is the registration record captured on the device. To the
//! durable queue it is opaque: the store serializes it to JSON and never
//! inspects the fields. Only the remote endpoint validates its content.

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// A student registration as captured by the admissions form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    /// Student's first name.
    pub first_name: String,
    /// Student's surname.
    pub last_name: String,
    /// Date of birth, ISO-8601 (`YYYY-MM-DD`).
    pub date_of_birth: String,
    /// Class the student is applying for (e.g. "JSS1").
    pub class_applied: String,
    /// Guardian contact details.
    pub guardian: Guardian,
    /// Entrance examination scores, if already available.
    #[serde(default)]
    pub scores: Vec<SubjectScore>,
}

/// Guardian contact details for a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
    /// Guardian's full name.
    pub name: String,
    /// Guardian's phone number.
    pub phone: String,
    /// Guardian's email address, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A single entrance examination score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    /// Subject name.
    pub subject: String,
    /// Score obtained.
    pub score: f64,
}

impl RegistrationPayload {
    /// Serialize to the JSON form persisted by the queue.
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(CodecError::Serialization)
    }

    /// Deserialize from the JSON form persisted by the queue.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        serde_json::from_str(json).map_err(CodecError::Deserialization)
    }
}
