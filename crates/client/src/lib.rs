//! HTTP client for the Brandloom context persistence service.
//!
//! Wraps the remote profile-update endpoint using [`reqwest`]. The
//! service owns all durability; this crate only ships consolidated
//! section payloads and decodes the canonical record it gets back.

pub mod api;
pub mod config;

pub use api::{ClientError, ContextApi};
pub use config::ClientConfig;
