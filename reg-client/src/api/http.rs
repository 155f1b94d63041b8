//! HTTP implementation of the registration endpoint.

use super::{ApiError, RegistrationApi};
use async_trait::async_trait;
use regsync_types::{CreateRegistration, CreatedRegistration, RegistrationId, RejectionBody};
use std::time::Duration;

/// REST client for `POST {base_url}/registrations/create`.
pub struct HttpRegistrationApi {
    client: reqwest::Client,
    create_url: String,
}

impl HttpRegistrationApi {
    /// Build a client for the given backend base URL.
    ///
    /// The timeout applies to each request as a whole; an elapsed timeout is
    /// reported as [`ApiError::Network`] so the record stays queued.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            client,
            create_url: format!("{}/registrations/create", base_url.trim_end_matches('/')),
        })
    }

    /// The URL this client posts registrations to.
    pub fn create_url(&self) -> &str {
        &self.create_url
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn create_registration(
        &self,
        req: &CreateRegistration,
    ) -> Result<RegistrationId, ApiError> {
        let response = self
            .client
            .post(&self.create_url)
            .json(req)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let body: CreatedRegistration = response
                .json()
                .await
                .map_err(|e| ApiError::Network(format!("invalid success body: {e}")))?;
            return Ok(body.id);
        }

        if status.is_client_error() {
            // Structured rejection body; fall back to raw text
            let text = response.text().await.unwrap_or_default();
            let body: RejectionBody =
                serde_json::from_str(&text).unwrap_or_else(|_| RejectionBody {
                    error: text,
                    fields: Default::default(),
                });
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: body.error,
                fields: body.fields,
            });
        }

        // 5xx and everything else: the server state is unknown, retry later
        Err(ApiError::Network(format!("server error: HTTP {status}")))
    }
}
