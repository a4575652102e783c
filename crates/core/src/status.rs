//! Save status reported by an editing surface.

use serde::{Deserialize, Serialize};

/// Progressive save indicator attached to an editing surface.
///
/// Not persisted anywhere; purely cosmetic UI state. `Saved` reverts to
/// `Idle` after a fixed delay, `Error` persists until the next flush
/// completes successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    /// Resting state; no unsaved edits in flight.
    #[default]
    Idle,
    /// A flush has been dispatched and is awaiting the server.
    Saving,
    /// The last flush succeeded. Reverts to `Idle` cosmetically.
    Saved,
    /// The last flush failed. Local edits are retained.
    Error,
}

impl SaveStatus {
    /// Human-readable label for the inline indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Saving => "Saving…",
            Self::Saved => "Saved",
            Self::Error => "Save failed",
        }
    }

    /// Whether a flush is currently awaiting a response.
    pub fn is_saving(self) -> bool {
        matches!(self, Self::Saving)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(SaveStatus::default(), SaveStatus::Idle);
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SaveStatus::Saving).unwrap(),
            "\"saving\""
        );
    }

    #[test]
    fn labels_cover_all_states() {
        assert!(SaveStatus::Idle.label().is_empty());
        assert!(!SaveStatus::Error.label().is_empty());
    }
}
