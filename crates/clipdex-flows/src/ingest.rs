//! Ingestion workflow: analyze → review → save.
//!
//! State machine:
//!
//! ```text
//! Editing(url) → Analyzing → Reviewing(form) | Editing(url, error)
//! Reviewing(form) → Saving → Editing("")
//! ```
//!
//! Cancel from Analyzing returns to `Editing(url)` without an error; the
//! review form's cancel returns to `Editing("")`. A failed save keeps the
//! form under review so the operator can retry. Every transition writes one
//! status message.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use clipdex_client::CatalogBackend;
use clipdex_core::{defaults, normalize, Error, MetadataForm, VideoMetadata};
use clipdex_tasks::{RunOutcome, StatusNotifier, TaskController, TaskPhase};

/// Where the ingestion workflow currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestPhase {
    /// Operator is editing the URL field. `error` is the inline error slot.
    Editing { url: String, error: Option<String> },
    /// Analysis in flight for `url`.
    Analyzing { url: String },
    /// Metadata returned; operator is reviewing/editing the form.
    Reviewing { form: MetadataForm },
    /// Persistence in flight for the reviewed form.
    Saving { form: MetadataForm },
}

impl IngestPhase {
    fn editing(url: impl Into<String>) -> Self {
        IngestPhase::Editing {
            url: url.into(),
            error: None,
        }
    }
}

/// The analyze→review→save workflow. Cloneable handle over shared state, so
/// a cancel handle can live alongside the awaited `analyze` call.
#[derive(Clone)]
pub struct IngestFlow {
    backend: Arc<dyn CatalogBackend>,
    task: TaskController<VideoMetadata>,
    status: StatusNotifier,
    phase: Arc<Mutex<IngestPhase>>,
}

impl IngestFlow {
    pub fn new(backend: Arc<dyn CatalogBackend>, status: StatusNotifier) -> Self {
        Self {
            backend,
            task: TaskController::new(|e| e.analyze_message()),
            status,
            phase: Arc::new(Mutex::new(IngestPhase::editing(""))),
        }
    }

    fn phase_slot(&self) -> MutexGuard<'_, IngestPhase> {
        self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current workflow phase.
    pub fn phase(&self) -> IngestPhase {
        self.phase_slot().clone()
    }

    /// Update the URL field. Only meaningful while editing; typing clears the
    /// inline error.
    pub fn set_url(&self, url: impl Into<String>) {
        let mut phase = self.phase_slot();
        if let IngestPhase::Editing { .. } = *phase {
            *phase = IngestPhase::editing(url);
        }
    }

    /// Run the analysis for the URL currently being edited.
    ///
    /// No-op if the URL is empty, if an analysis is already in flight, or if
    /// the workflow is not in the Editing phase.
    #[instrument(skip(self), fields(subsystem = "flows", op = "analyze"))]
    pub async fn analyze(&self) {
        if self.task.is_running() {
            debug!("Analysis already in flight");
            return;
        }
        let url = {
            let mut phase = self.phase_slot();
            let url = match &*phase {
                IngestPhase::Editing { url, .. } => url.clone(),
                _ => return,
            };
            if url.is_empty() {
                return;
            }
            *phase = IngestPhase::Analyzing { url: url.clone() };
            url
        };

        info!(url, "Starting analysis");
        self.status.set("Analyzing video...");

        let backend = self.backend.clone();
        let op_url = url.clone();
        let outcome = self.task.run(async move { backend.analyze(&op_url).await }).await;

        match outcome {
            RunOutcome::Rejected => {}
            RunOutcome::Superseded => {
                // A cancel (or reset) already restored the phase and status.
                debug!(url, "Analysis outcome discarded");
            }
            RunOutcome::Finished => match self.task.phase() {
                TaskPhase::Succeeded => {
                    let Some(metadata) = self.task.result() else {
                        return;
                    };
                    info!(url, title = %metadata.title, "Analysis succeeded");
                    *self.phase_slot() = IngestPhase::Reviewing {
                        form: normalize::to_edit(&metadata),
                    };
                    self.status.set_for(
                        "Analysis complete. Review before saving.",
                        Duration::from_millis(defaults::STATUS_NOTICE_MS),
                    );
                }
                TaskPhase::Failed => {
                    let message = self
                        .task
                        .error_message()
                        .unwrap_or_else(|| Error::Internal("missing failure message".into()).to_string());
                    warn!(url, error = %message, "Analysis failed");
                    *self.phase_slot() = IngestPhase::Editing {
                        url,
                        error: Some(message.clone()),
                    };
                    self.status.set(message);
                }
                _ => {}
            },
        }
    }

    /// Cancel an in-flight analysis. Returns to editing the same URL with no
    /// error. No-op outside the Analyzing phase.
    pub fn cancel_analysis(&self) {
        if !self.task.cancel() {
            return;
        }
        {
            let mut phase = self.phase_slot();
            if let IngestPhase::Analyzing { url } = phase.clone() {
                info!(url = %url, "Analysis cancelled");
                *phase = IngestPhase::editing(url);
            }
        }
        self.status
            .set_for("Analysis cancelled.", Duration::from_millis(defaults::STATUS_NOTICE_MS));
    }

    /// Discard the record under review and return to an empty URL field.
    pub fn discard_review(&self) {
        {
            let mut phase = self.phase_slot();
            if !matches!(*phase, IngestPhase::Reviewing { .. }) {
                return;
            }
            *phase = IngestPhase::editing("");
        }
        self.task.reset();
        self.status.clear();
    }

    /// Normalize, validate, and persist the reviewed form.
    ///
    /// Validation failures and save failures both keep the form under review;
    /// success clears the workflow back to `Editing("")`.
    #[instrument(skip_all, fields(subsystem = "flows", op = "save"))]
    pub async fn save(&self, form: MetadataForm) {
        if !matches!(*self.phase_slot(), IngestPhase::Reviewing { .. }) {
            return;
        }

        let canonical = normalize::to_canonical(form.clone());
        if let Err(e) = normalize::validate(&canonical) {
            let message = e.to_string();
            warn!(error = %message, "Save rejected locally");
            *self.phase_slot() = IngestPhase::Reviewing { form };
            self.status.set(message);
            return;
        }

        *self.phase_slot() = IngestPhase::Saving { form: form.clone() };
        self.status.set("Saving video...");

        match self.backend.save(&canonical).await {
            Ok(()) => {
                info!(title = %canonical.title, "Record saved");
                *self.phase_slot() = IngestPhase::editing("");
                self.task.reset();
                self.status.set_for(
                    "Video saved.",
                    Duration::from_millis(defaults::STATUS_NOTICE_MS),
                );
            }
            Err(e) => {
                let message = e.save_message();
                warn!(error = %e, "Save failed");
                *self.phase_slot() = IngestPhase::Reviewing { form };
                self.status.set(message);
            }
        }
    }
}
