//! # clipdex-flows
//!
//! End-to-end ingestion and search workflows for clipdex.
//!
//! Each flow composes a task controller, the status notifier, and the form
//! normalizer into one user-facing workflow. Flows are cloneable handles:
//! the UI layer holds one clone per callback, the way the controller slot
//! itself does.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use clipdex_client::HttpCatalogClient;
//! use clipdex_flows::{IngestFlow, IngestPhase};
//! use clipdex_tasks::StatusNotifier;
//!
//! let status = StatusNotifier::new();
//! let backend = Arc::new(HttpCatalogClient::from_env());
//! let ingest = IngestFlow::new(backend, status.clone());
//!
//! ingest.set_url("http://example.com/v/1");
//! ingest.analyze().await;
//! if let IngestPhase::Reviewing { form } = ingest.phase() {
//!     ingest.save(form).await;
//! }
//! ```

pub mod ingest;
pub mod search;

pub use ingest::{IngestFlow, IngestPhase};
pub use search::SearchFlow;
