//! Flush target abstraction.
//!
//! The coordinator dispatches consolidated section updates through a
//! [`SaveSink`] rather than calling the HTTP client directly, so tests
//! can substitute a recording mock and other transports can be added
//! without touching the debounce logic.

use async_trait::async_trait;

use brandloom_client::{ClientError, ContextApi};
use brandloom_core::{BusinessProfile, SectionUpdate};

/// Errors surfaced to the editing surface when a flush fails.
///
/// Collapsed to two variants because that is the full user-visible
/// taxonomy: the request never reached the service, or the service
/// refused the update.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SaveError {
    /// Network-level failure (connection, DNS, timeout, non-2xx).
    #[error("save request failed: {0}")]
    Transport(String),

    /// The service answered but rejected the update.
    #[error("update rejected: {0}")]
    Rejected(String),
}

/// Destination for consolidated section updates.
#[async_trait]
pub trait SaveSink: Send + Sync + 'static {
    /// Persist one full-section payload, returning the canonical
    /// profile record the service computed from it.
    async fn save_section(&self, update: SectionUpdate) -> Result<BusinessProfile, SaveError>;
}

/// [`SaveSink`] backed by the context service REST API.
pub struct HttpSink {
    api: ContextApi,
}

impl HttpSink {
    /// Wrap an existing API client.
    pub fn new(api: ContextApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SaveSink for HttpSink {
    async fn save_section(&self, update: SectionUpdate) -> Result<BusinessProfile, SaveError> {
        self.api.update_section(&update).await.map_err(|e| match e {
            ClientError::Rejected(message) => SaveError::Rejected(message),
            other => SaveError::Transport(other.to_string()),
        })
    }
}
