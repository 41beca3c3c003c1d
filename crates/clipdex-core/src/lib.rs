//! # clipdex-core
//!
//! Core types, error taxonomy, and form normalization for clipdex.
//!
//! This crate provides the foundational data structures that the other
//! clipdex crates depend on: the canonical metadata record, its transient
//! edit-form representation, and the normalizer that resolves one into the
//! other.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{
    AudioInfo, MetadataForm, PeopleValue, Person, SearchHit, SearchParams, StringListValue,
    VideoMetadata,
};
pub use normalize::{split_delimited, to_canonical, to_edit, validate};
