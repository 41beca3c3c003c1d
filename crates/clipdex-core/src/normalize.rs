//! Edit-form normalization.
//!
//! Resolves the loosely-typed form representation ([`MetadataForm`], where
//! array fields may be comma-delimited strings) into the canonical
//! [`VideoMetadata`] record, and renders the display-only inverse.
//!
//! `to_canonical` is pure, total, and idempotent: a form whose array fields
//! are already typed lists passes through unchanged, order and count
//! preserved, no deduplication.

use crate::error::{Error, Result};
use crate::models::{MetadataForm, PeopleValue, Person, StringListValue, VideoMetadata};

/// Split a comma-delimited field into trimmed, non-empty segments.
///
/// Trailing and doubled commas produce empty segments, which are dropped.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn resolve_strings(value: StringListValue) -> Vec<String> {
    match value {
        StringListValue::List(items) => items,
        StringListValue::Delimited(raw) => split_delimited(&raw),
    }
}

fn resolve_people(value: PeopleValue) -> Vec<Person> {
    match value {
        PeopleValue::List(people) => people,
        PeopleValue::Delimited(raw) => split_delimited(&raw).into_iter().map(Person::new).collect(),
    }
}

/// Resolve an edit form into the canonical record.
pub fn to_canonical(form: MetadataForm) -> VideoMetadata {
    VideoMetadata {
        title: form.title,
        description: form.description,
        source_url: form.source_url,
        people: resolve_people(form.people),
        scene_elements: resolve_strings(form.scene_elements),
        audio: form.audio,
        search_tags: resolve_strings(form.search_tags),
    }
}

/// Render a canonical record as an edit form.
///
/// String arrays become comma-joined edit strings. People stay a typed list:
/// the delimited rendering cannot carry roles, and an untouched form must
/// round-trip back to the same record. The forward direction re-normalizes,
/// so no trimming guarantee is needed here.
pub fn to_edit(meta: &VideoMetadata) -> MetadataForm {
    MetadataForm {
        title: meta.title.clone(),
        description: meta.description.clone(),
        source_url: meta.source_url.clone(),
        people: PeopleValue::List(meta.people.clone()),
        scene_elements: StringListValue::Delimited(meta.scene_elements.join(", ")),
        audio: meta.audio.clone(),
        search_tags: StringListValue::Delimited(meta.search_tags.join(", ")),
    }
}

/// Validate a record before it is offered to persistence.
///
/// Rejected locally; a record failing validation is never sent to the
/// collaborator.
pub fn validate(meta: &VideoMetadata) -> Result<()> {
    if meta.title.trim().is_empty() {
        return Err(Error::Validation("Title is required".to_string()));
    }
    if meta.description.trim().is_empty() {
        return Err(Error::Validation("Description is required".to_string()));
    }
    Ok(())
}
