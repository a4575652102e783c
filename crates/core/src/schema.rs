//! Business-profile section schema: section identifiers, field
//! definitions, and completion calculation.
//!
//! This module has **zero database dependencies**. All logic operates on
//! `serde_json::Value` maps; the persistence service remains the source
//! of truth for stored values and the coordinator passes them through
//! opaquely.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Section identifiers
// ---------------------------------------------------------------------------

/// A named group of related fields edited together and persisted as one
/// unit (one tab of the profile editor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    /// Company identity: name, industry, description.
    Business,
    /// Who the content is written for.
    Audience,
    /// Products, services, and differentiators.
    Offerings,
    /// Tone and vocabulary constraints for generated copy.
    BrandVoice,
    /// Content direction: topic, goal, target platforms.
    Strategy,
}

impl SectionId {
    /// All sections, in editor display order.
    pub const ALL: [SectionId; 5] = [
        SectionId::Business,
        SectionId::Audience,
        SectionId::Offerings,
        SectionId::BrandVoice,
        SectionId::Strategy,
    ];

    /// Machine-readable name (matches the JSON key used on the wire).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Audience => "audience",
            Self::Offerings => "offerings",
            Self::BrandVoice => "brand_voice",
            Self::Strategy => "strategy",
        }
    }

    /// Human-readable label for the section tab.
    pub fn label(self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::Audience => "Audience",
            Self::Offerings => "Offerings",
            Self::BrandVoice => "Brand Voice",
            Self::Strategy => "Content Strategy",
        }
    }

    /// Resolve a wire name back to a section id.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            "business" => Ok(Self::Business),
            "audience" => Ok(Self::Audience),
            "offerings" => Ok(Self::Offerings),
            "brand_voice" => Ok(Self::BrandVoice),
            "strategy" => Ok(Self::Strategy),
            other => Err(CoreError::UnknownSection(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Field definitions
// ---------------------------------------------------------------------------

/// Definition of a single editable field within a section.
///
/// This is a compile-time schema; the persistence service may store
/// additional derived keys that are passed through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDef {
    /// Machine-readable field name (the JSON key in the section map).
    pub name: &'static str,
    /// Human-readable display label.
    pub label: &'static str,
    /// Whether the field counts toward completion tracking.
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, required: bool) -> FieldDef {
    FieldDef {
        name,
        label,
        required,
    }
}

const BUSINESS_FIELDS: [FieldDef; 5] = [
    field("company_name", "Company Name", true),
    field("industry", "Industry", true),
    field("description", "Description", true),
    field("website", "Website", false),
    field("years_in_business", "Years in Business", false),
];

const AUDIENCE_FIELDS: [FieldDef; 4] = [
    field("target_audience", "Target Audience", true),
    field("age_range", "Age Range", false),
    field("interests", "Interests", false),
    field("pain_points", "Pain Points", false),
];

const OFFERINGS_FIELDS: [FieldDef; 4] = [
    field("products", "Products", true),
    field("services", "Services", false),
    field("unique_selling_points", "Unique Selling Points", false),
    field("price_range", "Price Range", false),
];

const BRAND_VOICE_FIELDS: [FieldDef; 4] = [
    field("tone", "Tone", true),
    field("keywords", "Keywords", false),
    field("avoid_words", "Words to Avoid", false),
    field("sample_phrases", "Sample Phrases", false),
];

const STRATEGY_FIELDS: [FieldDef; 5] = [
    field("topic", "Topic", true),
    field("goal", "Goal", true),
    field("platforms", "Platforms", true),
    field("posting_frequency", "Posting Frequency", false),
    field("cta_preference", "Call-to-Action Preference", false),
];

/// Return the field definitions for one section.
///
/// These are the fields the editor form, the completion tracker, and
/// the autosave payload all operate on.
pub fn section_fields(section: SectionId) -> &'static [FieldDef] {
    match section {
        SectionId::Business => &BUSINESS_FIELDS,
        SectionId::Audience => &AUDIENCE_FIELDS,
        SectionId::Offerings => &OFFERINGS_FIELDS,
        SectionId::BrandVoice => &BRAND_VOICE_FIELDS,
        SectionId::Strategy => &STRATEGY_FIELDS,
    }
}

/// Whether `name` is a known field of `section`.
pub fn is_known_field(section: SectionId, name: &str) -> bool {
    section_fields(section).iter().any(|f| f.name == name)
}

// ---------------------------------------------------------------------------
// Completion calculation
// ---------------------------------------------------------------------------

/// A field counts as filled when it is present and neither null, an
/// empty string, nor an empty array.
fn is_field_filled(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Percentage of required fields filled in one section's value map.
///
/// Sections without required fields report 100.
pub fn section_completion(
    section: SectionId,
    values: &serde_json::Map<String, serde_json::Value>,
) -> u8 {
    let required: Vec<&FieldDef> = section_fields(section)
        .iter()
        .filter(|f| f.required)
        .collect();

    if required.is_empty() {
        return 100;
    }

    let filled = required
        .iter()
        .filter(|f| values.get(f.name).map(is_field_filled).unwrap_or(false))
        .count();

    ((filled as f64 / required.len() as f64) * 100.0).round() as u8
}

/// Overall completion across every section, as the mean of per-section
/// percentages. Sections missing from `sections` count as 0.
pub fn overall_completion(
    sections: &HashMap<SectionId, serde_json::Map<String, serde_json::Value>>,
) -> u8 {
    let total: u32 = SectionId::ALL
        .iter()
        .map(|s| {
            sections
                .get(s)
                .map(|values| section_completion(*s, values) as u32)
                .unwrap_or(0)
        })
        .sum();

    (total as f64 / SectionId::ALL.len() as f64).round() as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, serde_json::Value)]) -> serde_json::Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    // -- Section names ------------------------------------------------------

    #[test]
    fn section_names_round_trip() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::parse(section.as_str()).unwrap(), section);
        }
    }

    #[test]
    fn unknown_section_rejected() {
        assert!(SectionId::parse("analytics").is_err());
    }

    #[test]
    fn section_serde_uses_snake_case() {
        let json = serde_json::to_string(&SectionId::BrandVoice).unwrap();
        assert_eq!(json, "\"brand_voice\"");
    }

    // -- Field membership ---------------------------------------------------

    #[test]
    fn known_field_accepted() {
        assert!(is_known_field(SectionId::Strategy, "topic"));
        assert!(is_known_field(SectionId::Business, "company_name"));
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(!is_known_field(SectionId::Strategy, "company_name"));
        assert!(!is_known_field(SectionId::Business, ""));
    }

    // -- Completion ---------------------------------------------------------

    #[test]
    fn empty_section_scores_zero() {
        let values = map(&[]);
        assert_eq!(section_completion(SectionId::Strategy, &values), 0);
    }

    #[test]
    fn fully_filled_section_scores_hundred() {
        let values = map(&[
            ("topic", json!("spring launch")),
            ("goal", json!("awareness")),
            ("platforms", json!(["instagram", "linkedin"])),
        ]);
        assert_eq!(section_completion(SectionId::Strategy, &values), 100);
    }

    #[test]
    fn partially_filled_section_scores_fraction() {
        // 1 of 3 required strategy fields filled -> 33%.
        let values = map(&[("topic", json!("spring launch"))]);
        assert_eq!(section_completion(SectionId::Strategy, &values), 33);
    }

    #[test]
    fn blank_and_null_values_do_not_count() {
        let values = map(&[
            ("topic", json!("   ")),
            ("goal", json!(null)),
            ("platforms", json!([])),
        ]);
        assert_eq!(section_completion(SectionId::Strategy, &values), 0);
    }

    #[test]
    fn optional_fields_do_not_affect_completion() {
        let values = map(&[
            ("topic", json!("t")),
            ("goal", json!("g")),
            ("platforms", json!(["x"])),
            ("posting_frequency", json!(null)),
        ]);
        assert_eq!(section_completion(SectionId::Strategy, &values), 100);
    }

    #[test]
    fn overall_averages_across_sections() {
        let mut sections = HashMap::new();
        sections.insert(
            SectionId::Strategy,
            map(&[
                ("topic", json!("t")),
                ("goal", json!("g")),
                ("platforms", json!(["x"])),
            ]),
        );
        // 100 for strategy, 0 for the four missing sections -> 20.
        assert_eq!(overall_completion(&sections), 20);
    }
}
