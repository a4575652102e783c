//! Surface-level events broadcast to indicator widgets.
//!
//! Subscribers receive every event via a `tokio::sync::broadcast`
//! channel; if there are no active subscribers the events are silently
//! dropped. Events carry only what an indicator needs to render — the
//! authoritative field state lives on the surface itself.

use brandloom_core::{SaveStatus, SectionId};

/// A state change on one editing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum AutosaveEvent {
    /// The progressive save indicator changed state.
    StatusChanged {
        /// Section the surface is bound to.
        section: SectionId,
        /// The new indicator state.
        status: SaveStatus,
    },

    /// A consolidated flush was dispatched to the persistence service.
    FlushDispatched {
        /// Section whose payload was sent.
        section: SectionId,
    },

    /// A flush failed; local edits are retained.
    SaveFailed {
        /// Section whose flush failed.
        section: SectionId,
        /// Human-readable failure message for the inline indicator.
        message: String,
    },

    /// The server returned a canonical record; derived values (such as
    /// the completion percentage) may have changed without user action.
    ProfileRefreshed {
        /// Server-recomputed overall completion, 0-100.
        overall: u8,
    },
}
