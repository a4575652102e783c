use std::time::Duration;

/// Client configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the context service (default: `http://localhost:3000/api`).
    pub base_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `CONTEXT_API_URL`      | `http://localhost:3000/api` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Self {
        let base_url = std::env::var("CONTEXT_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
        }
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            request_timeout_secs: 30,
        }
    }
}
