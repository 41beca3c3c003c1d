//! Cancellable single-slot task controller.
//!
//! A [`TaskController`] owns the lifecycle of one logical async operation at
//! a time: Idle → Running → Succeeded/Failed/Cancelled. Cancellation takes
//! effect synchronously; the underlying future is not aborted, its outcome is
//! discarded when it eventually settles.
//!
//! Staleness is decided by a monotonic generation counter, not a boolean
//! flag. Every `run`, `cancel`, and `reset` bumps the generation; a settling
//! outcome only applies if the generation it captured is still current. An
//! integer compare is required to distinguish "cancelled run N" from
//! "completed run N+1" — a flag cannot.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use clipdex_core::{Error, Result};

/// Lifecycle phase of the controller's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// No operation has run since creation or the last reset.
    Idle,
    /// An operation is in flight.
    Running,
    /// The last operation completed; a result is stored.
    Succeeded,
    /// The last operation failed; an operator message is stored.
    Failed,
    /// The last operation was cancelled before it settled.
    Cancelled,
}

/// What happened to a `run` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The operation settled and its outcome was applied.
    Finished,
    /// Rejected: another operation was already running. Nothing changed.
    Rejected,
    /// The operation settled after a `cancel` or `reset` invalidated it; the
    /// outcome was discarded without mutating visible state.
    Superseded,
}

struct Slot<R> {
    phase: TaskPhase,
    result: Option<R>,
    error: Option<String>,
    generation: u64,
}

/// Single-slot controller for one cancellable async operation.
///
/// Cloning yields another handle to the same slot, so a cancel handle can be
/// held while `run` is being awaited.
pub struct TaskController<R> {
    slot: Arc<Mutex<Slot<R>>>,
    classify: fn(&Error) -> String,
}

impl<R> Clone for TaskController<R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            classify: self.classify,
        }
    }
}

impl<R> TaskController<R> {
    /// Create a controller whose failure messages are derived by `classify`.
    ///
    /// The classifier is a pure function of the error shape (for example
    /// [`Error::analyze_message`]); it runs once per failed operation.
    pub fn new(classify: fn(&Error) -> String) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                phase: TaskPhase::Idle,
                result: None,
                error: None,
                generation: 0,
            })),
            classify,
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot<R>> {
        // Lock is only held for field updates; a poisoned slot is still
        // structurally valid.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run one operation to completion.
    ///
    /// No-op ([`RunOutcome::Rejected`]) if an operation is already running.
    /// Otherwise clears the previous result/error, transitions to Running,
    /// and awaits `op`. The outcome is applied only if no `cancel` or
    /// `reset` intervened; otherwise it is discarded silently.
    pub async fn run<F>(&self, op: F) -> RunOutcome
    where
        F: Future<Output = Result<R>>,
    {
        let generation = {
            let mut slot = self.slot();
            if slot.phase == TaskPhase::Running {
                debug!(
                    generation = slot.generation,
                    "Run rejected: operation already in flight"
                );
                return RunOutcome::Rejected;
            }
            slot.phase = TaskPhase::Running;
            slot.result = None;
            slot.error = None;
            slot.generation += 1;
            slot.generation
        };

        let outcome = op.await;

        let mut slot = self.slot();
        if slot.generation != generation {
            debug!(
                generation,
                current = slot.generation,
                "Discarding stale outcome"
            );
            return RunOutcome::Superseded;
        }

        match outcome {
            Ok(value) => {
                slot.phase = TaskPhase::Succeeded;
                slot.result = Some(value);
            }
            Err(e) => {
                let message = (self.classify)(&e);
                warn!(generation, error = %e, "Operation failed");
                slot.phase = TaskPhase::Failed;
                slot.error = Some(message);
            }
        }
        RunOutcome::Finished
    }

    /// Cancel the in-flight operation.
    ///
    /// No-op unless Running. Takes effect before this function returns: the
    /// phase flips to Cancelled and the generation bump invalidates the
    /// pending outcome. The underlying future keeps running until it settles
    /// on its own; its outcome is then discarded.
    ///
    /// Returns `true` if an operation was actually cancelled.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot();
        if slot.phase != TaskPhase::Running {
            return false;
        }
        slot.generation += 1;
        slot.phase = TaskPhase::Cancelled;
        debug!(generation = slot.generation, "Operation cancelled");
        true
    }

    /// Force the slot back to Idle, clearing result and error.
    ///
    /// Safe to call in any phase, including Running: the generation bump
    /// ensures an in-flight outcome cannot resurrect a reset slot.
    pub fn reset(&self) {
        let mut slot = self.slot();
        slot.generation += 1;
        slot.phase = TaskPhase::Idle;
        slot.result = None;
        slot.error = None;
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TaskPhase {
        self.slot().phase
    }

    /// Whether an operation is in flight.
    pub fn is_running(&self) -> bool {
        self.phase() == TaskPhase::Running
    }

    /// Stored operator message, present only in the Failed phase.
    pub fn error_message(&self) -> Option<String> {
        self.slot().error.clone()
    }

    /// Current generation counter. Diagnostic only.
    pub fn generation(&self) -> u64 {
        self.slot().generation
    }
}

impl<R: Clone> TaskController<R> {
    /// Stored result, present only in the Succeeded phase.
    pub fn result(&self) -> Option<R> {
        self.slot().result.clone()
    }
}
