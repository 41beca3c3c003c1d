//! Centralized default constants for clipdex.
//!
//! Single source of truth for shared default values. Crates reference these
//! constants instead of defining their own magic numbers.

// =============================================================================
// SEARCH
// =============================================================================

/// Default number of hits returned by a search query.
pub const SEARCH_LIMIT: usize = 5;

/// Default minimum cosine similarity for a hit to be returned.
pub const SEARCH_THRESHOLD: f32 = 0.25;

// =============================================================================
// STATUS
// =============================================================================

/// The idle status line. Every expiry reverts to this literal string.
pub const STATUS_READY: &str = "Ready";

/// How long transient confirmations ("saved", "complete") stay on screen.
pub const STATUS_NOTICE_MS: u64 = 5_000;

// =============================================================================
// PROGRESS
// =============================================================================

/// Delay before the progress ramp starts advancing, so a restart visibly
/// drops to zero first.
pub const PROGRESS_SETTLE_MS: u64 = 50;

/// Duration of the main ramp toward the ceiling.
pub const PROGRESS_RAMP_SECS: u64 = 30;

/// Ramp ceiling. The bar never reaches 100% from time alone.
pub const PROGRESS_CEILING: f64 = 0.95;

/// Duration of the snap to 100% once the task settles.
pub const PROGRESS_SNAP_MS: u64 = 500;

/// How long the full bar stays visible before dismissal.
pub const PROGRESS_GRACE_MS: u64 = 400;

// =============================================================================
// HTTP
// =============================================================================

/// Default base URL for the catalog API.
pub const API_BASE: &str = "http://localhost:8000/api";

/// Default client-side timeout for catalog requests (seconds). Analysis is
/// slow; the server enforces its own 504 budget below this.
pub const HTTP_TIMEOUT_SECS: u64 = 120;
