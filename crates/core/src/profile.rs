//! Canonical profile record and update payload shapes.
//!
//! Section contents are opaque JSON maps: the persistence service is
//! the source of truth and may normalize values or add derived keys.
//! The client never validates them beyond schema field membership.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::schema::SectionId;
use crate::types::{ProfileId, Timestamp};

/// Server-computed completion percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionStatus {
    /// Overall completion across all sections, 0-100.
    pub overall: u8,
    /// Per-section completion, 0-100.
    #[serde(default)]
    pub sections: HashMap<SectionId, u8>,
}

/// The canonical business profile record as returned by the service.
///
/// Returned in full by every section update so the editor can replace
/// its local state with the normalized server copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Server-assigned profile identifier.
    pub id: ProfileId,
    /// Every section's current field map.
    #[serde(default)]
    pub sections: HashMap<SectionId, Map<String, Value>>,
    /// Completion percentages recomputed by the server on each update.
    #[serde(default)]
    pub completion_status: CompletionStatus,
    /// Last modification time (UTC).
    pub updated_at: Timestamp,
}

impl BusinessProfile {
    /// The stored field map for one section, if the server has one.
    pub fn section(&self, section: SectionId) -> Option<&Map<String, Value>> {
        self.sections.get(&section)
    }
}

/// The consolidated update sent by a flush.
///
/// Carries the complete section payload, not a per-field delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionUpdate {
    /// Which profile is being edited.
    pub identifier: ProfileId,
    /// The section being replaced.
    pub section_id: SectionId,
    /// Full field map for the section.
    pub section_data: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_update_wire_shape() {
        let update = SectionUpdate {
            identifier: uuid::Uuid::nil(),
            section_id: SectionId::Strategy,
            section_data: [("topic".to_string(), json!("launch"))]
                .into_iter()
                .collect(),
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["section_id"], "strategy");
        assert_eq!(value["section_data"]["topic"], "launch");
        assert!(value["identifier"].is_string());
    }

    #[test]
    fn profile_deserializes_with_missing_optional_fields() {
        let raw = json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "updated_at": "2026-01-15T10:00:00Z",
        });

        let profile: BusinessProfile = serde_json::from_value(raw).unwrap();
        assert!(profile.sections.is_empty());
        assert_eq!(profile.completion_status.overall, 0);
    }

    #[test]
    fn completion_status_round_trips() {
        let raw = json!({
            "overall": 80,
            "sections": { "strategy": 100, "business": 60 },
        });

        let status: CompletionStatus = serde_json::from_value(raw).unwrap();
        assert_eq!(status.overall, 80);
        assert_eq!(status.sections.get(&SectionId::Strategy), Some(&100));
    }
}
