//! # clipdex-tasks
//!
//! Cancellable async task lifecycle primitives for clipdex.
//!
//! This crate provides:
//! - A single-slot [`TaskController`] with generation-counted cancellation
//! - A process-wide [`StatusNotifier`] slot with auto-expiring messages
//! - A deterministic, time-fed [`ProgressEstimator`]
//!
//! ## Example
//!
//! ```ignore
//! use clipdex_tasks::{TaskController, RunOutcome, TaskPhase};
//! use clipdex_core::Error;
//!
//! let task: TaskController<String> = TaskController::new(|e| e.analyze_message());
//! let handle = task.clone();
//!
//! // Somewhere else: handle.cancel() flips the state immediately; the
//! // outcome of the still-running future is discarded when it settles.
//! let outcome = task.run(async { Ok("payload".to_string()) }).await;
//! assert_eq!(outcome, RunOutcome::Finished);
//! assert_eq!(task.phase(), TaskPhase::Succeeded);
//! ```

pub mod progress;
pub mod status;
pub mod task;

pub use progress::{ProgressCurve, ProgressEstimator};
pub use status::StatusNotifier;
pub use task::{RunOutcome, TaskController, TaskPhase};
