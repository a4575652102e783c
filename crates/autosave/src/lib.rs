//! Debounced autosave coordinator for profile editing surfaces.
//!
//! Converts a burst of local field edits into exactly one network write
//! per quiet period while keeping the local field state instantly
//! responsive. An [`AutosaveSurface`] owns one section of the profile
//! editor; its background task debounces edits, dispatches consolidated
//! flushes through a [`SaveSink`], and drives the progressive save
//! indicator (idle -> saving -> saved/error).
//!
//! The coordinator is best-effort by design: failed flushes are never
//! retried automatically and local edits are never rolled back. The
//! persistence service is the source of truth; when responses overlap,
//! the last one to arrive wins.

pub mod events;
pub mod sink;
pub mod surface;

pub use events::AutosaveEvent;
pub use sink::{HttpSink, SaveError, SaveSink};
pub use surface::{AutosaveConfig, AutosaveSurface};
