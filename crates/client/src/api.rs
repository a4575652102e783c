//! REST API client for the context service profile endpoints.
//!
//! Wraps the profile section-update endpoint using [`reqwest`]. The
//! service replies with either the full canonical profile record or an
//! error message; an `error`-bearing 2xx body counts as a failure just
//! like a non-2xx status.

use serde::Deserialize;

use brandloom_core::{BusinessProfile, SectionUpdate};

use crate::config::ClientConfig;

/// HTTP client for the context persistence service.
pub struct ContextApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response body of the profile update endpoint.
///
/// Exactly one of the two fields is populated by the service.
#[derive(Debug, Deserialize)]
struct UpdateResponse {
    profile: Option<BusinessProfile>,
    error: Option<String>,
}

/// Errors from the context service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Context service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response carrying an application-level error message.
    #[error("Update rejected: {0}")]
    Rejected(String),

    /// A 2xx response with neither a profile nor an error field.
    #[error("Malformed response from context service")]
    MalformedResponse,
}

impl ContextApi {
    /// Create a new API client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("reqwest client construction cannot fail with static options");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across services).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Base HTTP URL of the context service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace one profile section with a consolidated payload.
    ///
    /// Sends a `PATCH /context/profile` request carrying the full
    /// section field map and returns the canonical record the service
    /// computed from it (normalized values, recomputed completion).
    pub async fn update_section(
        &self,
        update: &SectionUpdate,
    ) -> Result<BusinessProfile, ClientError> {
        let response = self
            .client
            .patch(format!("{}/context/profile", self.base_url))
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: UpdateResponse = response.json().await?;
        match body {
            UpdateResponse {
                error: Some(message),
                ..
            } => Err(ClientError::Rejected(message)),
            UpdateResponse {
                profile: Some(profile),
                ..
            } => {
                tracing::debug!(
                    profile_id = %profile.id,
                    section = update.section_id.as_str(),
                    completion = profile.completion_status.overall,
                    "Profile section updated"
                );
                Ok(profile)
            }
            _ => Err(ClientError::MalformedResponse),
        }
    }
}
