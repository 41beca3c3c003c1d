//! Mock catalog backend for deterministic testing.
//!
//! Scripted responses are consumed in FIFO order; with nothing scripted the
//! mock answers deterministically (analysis derived from the URL, empty
//! search results, successful saves). Optional latency makes cancellation
//! windows reproducible under paused-time tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use clipdex_core::{AudioInfo, Error, Result, SearchHit, SearchParams, VideoMetadata};

use crate::backend::CatalogBackend;

/// One recorded call, for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// "analyze", "save", or "search".
    pub operation: String,
    /// URL, title, or query depending on the operation.
    pub input: String,
}

#[derive(Default)]
struct MockState {
    analyze_responses: VecDeque<Result<VideoMetadata>>,
    search_responses: VecDeque<Result<Vec<SearchHit>>>,
    save_responses: VecDeque<Result<()>>,
    calls: Vec<MockCall>,
}

/// Mock implementation of [`CatalogBackend`].
#[derive(Clone, Default)]
pub struct MockCatalogBackend {
    state: Arc<Mutex<MockState>>,
    latency: Duration,
}

impl MockCatalogBackend {
    /// Create a mock with no scripted responses and no latency.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Simulate this much processing time on every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queue a successful analysis result.
    pub fn with_analysis(self, metadata: VideoMetadata) -> Self {
        self.state().analyze_responses.push_back(Ok(metadata));
        self
    }

    /// Queue a failed analysis.
    pub fn with_analysis_failure(self, error: Error) -> Self {
        self.state().analyze_responses.push_back(Err(error));
        self
    }

    /// Queue a successful search result set.
    pub fn with_search_results(self, hits: Vec<SearchHit>) -> Self {
        self.state().search_responses.push_back(Ok(hits));
        self
    }

    /// Queue a failed search.
    pub fn with_search_failure(self, error: Error) -> Self {
        self.state().search_responses.push_back(Err(error));
        self
    }

    /// Queue a failed save.
    pub fn with_save_failure(self, error: Error) -> Self {
        self.state().save_responses.push_back(Err(error));
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Number of recorded calls for one operation.
    pub fn call_count(&self, operation: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn record(&self, operation: &str, input: &str) {
        self.state().calls.push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Deterministic analysis used when nothing is scripted.
    fn default_analysis(url: &str) -> VideoMetadata {
        VideoMetadata {
            title: format!("Analysis of {url}"),
            description: format!("Auto-generated description for {url}"),
            source_url: url.to_string(),
            people: Vec::new(),
            scene_elements: vec!["mock scene".to_string()],
            audio: AudioInfo::default(),
            search_tags: vec!["mock".to_string()],
        }
    }
}

#[async_trait]
impl CatalogBackend for MockCatalogBackend {
    async fn analyze(&self, url: &str) -> Result<VideoMetadata> {
        self.record("analyze", url);
        self.simulate_latency().await;
        match self.state().analyze_responses.pop_front() {
            Some(response) => response,
            None => Ok(Self::default_analysis(url)),
        }
    }

    async fn save(&self, metadata: &VideoMetadata) -> Result<()> {
        self.record("save", &metadata.title);
        self.simulate_latency().await;
        match self.state().save_responses.pop_front() {
            Some(response) => response,
            None => Ok(()),
        }
    }

    async fn search(&self, params: SearchParams) -> Result<Vec<SearchHit>> {
        self.record("search", &params.query);
        self.simulate_latency().await;
        match self.state().search_responses.pop_front() {
            Some(response) => response,
            None => Ok(Vec::new()),
        }
    }
}
