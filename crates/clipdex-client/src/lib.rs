//! # clipdex-client
//!
//! Catalog API client for clipdex.
//!
//! The collaborator surface is three calls — `analyze`, `save`, `search` —
//! behind the [`CatalogBackend`] trait. [`HttpCatalogClient`] talks to the
//! real API; [`mock::MockCatalogBackend`] scripts responses for tests.

pub mod backend;
pub mod http;
pub mod mock;

pub use backend::CatalogBackend;
pub use http::HttpCatalogClient;
pub use mock::{MockCall, MockCatalogBackend};
