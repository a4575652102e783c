//! The pending edit buffer.
//!
//! A buffer holds the section being edited plus a snapshot of that
//! section's **full** field map — not just the changed field, because
//! the persistence endpoint expects a complete section payload. Every
//! edit inside the debounce window replaces the snapshot wholesale
//! (last-write-wins); the coordinator takes the buffer at the moment a
//! flush is dispatched so a new edit during an in-flight save starts a
//! fresh buffer.

use serde_json::{Map, Value};

use crate::schema::SectionId;

/// A consolidated, not-yet-flushed edit to one section.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    section: SectionId,
    snapshot: Map<String, Value>,
}

impl EditBuffer {
    /// Create a buffer from a full-section snapshot.
    pub fn new(section: SectionId, snapshot: Map<String, Value>) -> Self {
        Self { section, snapshot }
    }

    /// The section this buffer belongs to.
    pub fn section(&self) -> SectionId {
        self.section
    }

    /// The buffered full-section field map.
    pub fn snapshot(&self) -> &Map<String, Value> {
        &self.snapshot
    }

    /// Replace the snapshot wholesale with a newer one.
    ///
    /// There is no per-field merge: the incoming snapshot already
    /// carries every field of the section at its current value.
    pub fn replace(&mut self, snapshot: Map<String, Value>) {
        self.snapshot = snapshot;
    }

    /// Consume the buffer, yielding the section and payload for a flush.
    pub fn into_parts(self) -> (SectionId, Map<String, Value>) {
        (self.section, self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn replace_is_wholesale() {
        let mut buffer = EditBuffer::new(
            SectionId::Strategy,
            snapshot(&[("topic", json!("old")), ("goal", json!("grow"))]),
        );

        // The newer snapshot omits "goal" entirely; the buffer must not
        // retain it from the previous snapshot.
        buffer.replace(snapshot(&[("topic", json!("new"))]));

        assert_eq!(buffer.snapshot().get("topic"), Some(&json!("new")));
        assert!(buffer.snapshot().get("goal").is_none());
    }

    #[test]
    fn into_parts_yields_section_and_payload() {
        let buffer = EditBuffer::new(
            SectionId::Business,
            snapshot(&[("company_name", json!("Acme"))]),
        );

        let (section, payload) = buffer.into_parts();
        assert_eq!(section, SectionId::Business);
        assert_eq!(payload.get("company_name"), Some(&json!("Acme")));
    }
}
