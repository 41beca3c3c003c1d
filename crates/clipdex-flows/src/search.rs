//! Search workflow: query → results.
//!
//! State machine: `Idle → Searching(query) → Results | Idle(error)`. Cancel
//! from Searching returns to Idle with the previous results untouched;
//! results are replaced only when a query succeeds.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use clipdex_client::CatalogBackend;
use clipdex_core::{defaults, SearchHit, SearchParams};
use clipdex_tasks::{RunOutcome, StatusNotifier, TaskController, TaskPhase};

struct SearchState {
    searching: Option<String>,
    results: Vec<SearchHit>,
    has_searched: bool,
    error: Option<String>,
}

/// The query→list workflow. Cloneable handle over shared state.
#[derive(Clone)]
pub struct SearchFlow {
    backend: Arc<dyn CatalogBackend>,
    task: TaskController<Vec<SearchHit>>,
    status: StatusNotifier,
    state: Arc<Mutex<SearchState>>,
}

impl SearchFlow {
    pub fn new(backend: Arc<dyn CatalogBackend>, status: StatusNotifier) -> Self {
        Self {
            backend,
            task: TaskController::new(|e| e.search_message()),
            status,
            state: Arc::new(Mutex::new(SearchState {
                searching: None,
                results: Vec::new(),
                has_searched: false,
                error: None,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a query with the default limit and threshold.
    ///
    /// No-op if the trimmed query is empty or a search is already in flight.
    #[instrument(skip(self), fields(subsystem = "flows", op = "search"))]
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        if self.task.is_running() {
            debug!("Search already in flight");
            return;
        }

        {
            let mut state = self.state();
            state.searching = Some(query.to_string());
            state.has_searched = true;
            state.error = None;
        }
        info!(query, "Searching");
        self.status.set(format!("Searching for \"{query}\"..."));

        let backend = self.backend.clone();
        let params = SearchParams::new(query);
        let outcome = self.task.run(async move { backend.search(params).await }).await;

        match outcome {
            RunOutcome::Rejected => {}
            RunOutcome::Superseded => {
                debug!(query, "Search outcome discarded");
            }
            RunOutcome::Finished => match self.task.phase() {
                TaskPhase::Succeeded => {
                    let hits = self.task.result().unwrap_or_default();
                    info!(query, result_count = hits.len(), "Search complete");
                    let count = hits.len();
                    {
                        let mut state = self.state();
                        state.results = hits;
                        state.searching = None;
                    }
                    self.status.set_for(
                        format!("{count} objects found."),
                        Duration::from_millis(defaults::STATUS_NOTICE_MS),
                    );
                }
                TaskPhase::Failed => {
                    let message = self
                        .task
                        .error_message()
                        .unwrap_or_else(|| "Error accessing database index.".to_string());
                    warn!(query, error = %message, "Search failed");
                    {
                        let mut state = self.state();
                        state.error = Some(message.clone());
                        state.searching = None;
                    }
                    self.status.set(message);
                }
                _ => {}
            },
        }
    }

    /// Cancel an in-flight query. Prior results stay untouched.
    pub fn cancel(&self) {
        if !self.task.cancel() {
            return;
        }
        self.state().searching = None;
        self.status.set_for(
            "Search cancelled.",
            Duration::from_millis(defaults::STATUS_NOTICE_MS),
        );
    }

    /// Whether a query is in flight.
    pub fn is_searching(&self) -> bool {
        self.state().searching.is_some()
    }

    /// Latest successful result set.
    pub fn results(&self) -> Vec<SearchHit> {
        self.state().results.clone()
    }

    /// Whether any query has been issued yet (drives the empty state).
    pub fn has_searched(&self) -> bool {
        self.state().has_searched
    }

    /// Inline error from the last failed query, if any.
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }
}
