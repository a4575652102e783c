//! Brandloom domain types and pure editing logic.
//!
//! This crate has **zero I/O dependencies**. It provides the building
//! blocks shared by the HTTP client and the autosave coordinator:
//!
//! - [`schema`] — static field definitions for every profile section,
//!   plus completion calculation over them.
//! - [`buffer`] — the pending edit buffer (full-section snapshot,
//!   last-write-wins).
//! - [`status`] — the 4-state save status machine.
//! - [`profile`] — the canonical profile record returned by the
//!   persistence service, treated as opaque JSON per section.

pub mod buffer;
pub mod error;
pub mod profile;
pub mod schema;
pub mod status;
pub mod types;

pub use buffer::EditBuffer;
pub use error::CoreError;
pub use profile::{BusinessProfile, CompletionStatus, SectionUpdate};
pub use schema::{FieldDef, SectionId};
pub use status::SaveStatus;
