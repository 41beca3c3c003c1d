//! Wire and edit-form data models for the clipdex catalog.
//!
//! Two representations exist for the same record:
//!
//! - [`VideoMetadata`] is the canonical, typed shape. Array fields are real
//!   arrays. This is the only shape that crosses the persistence boundary.
//! - [`MetadataForm`] is the transient edit-time shape. Array fields are a
//!   tagged union that also admits a single comma-delimited string, because
//!   that is what a free-text form field produces. The union is resolved
//!   exactly once, at the normalizer boundary (see [`crate::normalize`]).

use serde::{Deserialize, Serialize};

/// A person detected in the video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Free-text description ("woman in a red coat").
    pub description: String,
    /// Optional role ("presenter", "passerby").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Person {
    /// Create a person with a description and no role.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            role: None,
        }
    }
}

/// Audio track analysis for a video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Transcript excerpt or lyrics.
    #[serde(default)]
    pub transcript: String,
    /// Identified track name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    /// Identified artist, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Canonical structured metadata for one video. This is the persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Suggested title (required, non-empty before save).
    pub title: String,
    /// Full description (required, non-empty before save).
    pub description: String,
    /// Source URL. Immutable after creation; rendered read-only in the UI.
    pub source_url: String,
    /// People detected in the video.
    #[serde(default)]
    pub people: Vec<Person>,
    /// Scenery elements, in detection order. Duplicates allowed but meaningless.
    #[serde(default)]
    pub scene_elements: Vec<String>,
    /// Audio analysis.
    #[serde(default)]
    pub audio: AudioInfo,
    /// Search index tags, in order.
    #[serde(default)]
    pub search_tags: Vec<String>,
}

/// One hit from a semantic search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Legacy records carry `summary` instead of `description`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub source_url: String,
    /// Cosine similarity in `[0, 1]`.
    pub similarity: f32,
}

impl SearchHit {
    /// Display summary, falling back to the legacy `summary` field.
    pub fn display_summary(&self) -> &str {
        self.description
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or("")
    }
}

/// Parameters for a semantic search query. Serialized as the `/search` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
    #[serde(default = "default_search_threshold")]
    pub threshold: f32,
}

fn default_search_limit() -> usize {
    crate::defaults::SEARCH_LIMIT
}

fn default_search_threshold() -> f32 {
    crate::defaults::SEARCH_THRESHOLD
}

impl SearchParams {
    /// Build params for a query with the default limit and threshold.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: crate::defaults::SEARCH_LIMIT,
            threshold: crate::defaults::SEARCH_THRESHOLD,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// A string-array form field: either already an array, or the raw
/// comma-delimited text the operator typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringListValue {
    List(Vec<String>),
    Delimited(String),
}

impl From<Vec<String>> for StringListValue {
    fn from(v: Vec<String>) -> Self {
        StringListValue::List(v)
    }
}

impl From<&str> for StringListValue {
    fn from(s: &str) -> Self {
        StringListValue::Delimited(s.to_string())
    }
}

/// The people form field: a typed list, or comma-delimited descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeopleValue {
    List(Vec<Person>),
    Delimited(String),
}

impl From<Vec<Person>> for PeopleValue {
    fn from(v: Vec<Person>) -> Self {
        PeopleValue::List(v)
    }
}

impl From<&str> for PeopleValue {
    fn from(s: &str) -> Self {
        PeopleValue::Delimited(s.to_string())
    }
}

/// Edit-time representation of [`VideoMetadata`], as bound to the review
/// form. Exists only inside the form lifecycle; must be resolved through
/// [`crate::normalize::to_canonical`] before persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataForm {
    pub title: String,
    pub description: String,
    pub source_url: String,
    pub people: PeopleValue,
    pub scene_elements: StringListValue,
    #[serde(default)]
    pub audio: AudioInfo,
    pub search_tags: StringListValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(description: Option<&str>, summary: Option<&str>) -> SearchHit {
        SearchHit {
            id: "vid-1".to_string(),
            title: "Street scene".to_string(),
            description: description.map(String::from),
            summary: summary.map(String::from),
            source_url: "http://example.com/v/1".to_string(),
            similarity: 0.82,
        }
    }

    #[test]
    fn test_display_summary_prefers_description() {
        let h = hit(Some("new style"), Some("old style"));
        assert_eq!(h.display_summary(), "new style");
    }

    #[test]
    fn test_display_summary_falls_back_to_legacy_summary() {
        let h = hit(None, Some("old style"));
        assert_eq!(h.display_summary(), "old style");
    }

    #[test]
    fn test_display_summary_empty_when_both_absent() {
        let h = hit(None, None);
        assert_eq!(h.display_summary(), "");
    }

    #[test]
    fn test_search_hit_deserializes_legacy_row() {
        let json = r#"{
            "id": "42",
            "title": "Old clip",
            "summary": "pre-migration record",
            "source_url": "http://example.com/v/42",
            "similarity": 0.5
        }"#;
        let h: SearchHit = serde_json::from_str(json).unwrap();
        assert!(h.description.is_none());
        assert_eq!(h.display_summary(), "pre-migration record");
    }

    #[test]
    fn test_string_list_value_untagged_array() {
        let v: StringListValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(
            v,
            StringListValue::List(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_string_list_value_untagged_string() {
        let v: StringListValue = serde_json::from_str(r#""a, b""#).unwrap();
        assert_eq!(v, StringListValue::Delimited("a, b".to_string()));
    }

    #[test]
    fn test_people_value_untagged() {
        let v: PeopleValue =
            serde_json::from_str(r#"[{"description":"drummer","role":"musician"}]"#).unwrap();
        match v {
            PeopleValue::List(people) => {
                assert_eq!(people[0].description, "drummer");
                assert_eq!(people[0].role.as_deref(), Some("musician"));
            }
            PeopleValue::Delimited(_) => panic!("expected typed list"),
        }

        let v: PeopleValue = serde_json::from_str(r#""drummer, singer""#).unwrap();
        assert_eq!(v, PeopleValue::Delimited("drummer, singer".to_string()));
    }

    #[test]
    fn test_search_params_defaults() {
        let p = SearchParams::new("sunset over bridge");
        assert_eq!(p.limit, crate::defaults::SEARCH_LIMIT);
        assert_eq!(p.threshold, crate::defaults::SEARCH_THRESHOLD);

        let p: SearchParams = serde_json::from_str(r#"{"query":"x"}"#).unwrap();
        assert_eq!(p.limit, crate::defaults::SEARCH_LIMIT);
        assert_eq!(p.threshold, crate::defaults::SEARCH_THRESHOLD);
    }

    #[test]
    fn test_video_metadata_roundtrip() {
        let meta = VideoMetadata {
            title: "Carnival".to_string(),
            description: "Crowd dancing at night".to_string(),
            source_url: "http://example.com/v/9".to_string(),
            people: vec![Person::new("dancer in costume")],
            scene_elements: vec!["confetti".to_string(), "stage".to_string()],
            audio: AudioInfo {
                transcript: "la la la".to_string(),
                track_name: Some("Samba nights".to_string()),
                artist: None,
            },
            search_tags: vec!["carnival".to_string()],
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(!json.contains("artist")); // None -> absent
        let back: VideoMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
