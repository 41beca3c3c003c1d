//! Structured logging field name constants for clipdex.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values |
//! | TRACE | Per-item iteration, high-volume data |

/// Subsystem originating the log event.
/// Values: "tasks", "client", "flows"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "task_controller", "status_notifier", "http_client"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "analyze", "save", "search"
pub const OPERATION: &str = "op";

/// Task generation counter at the time of the event.
pub const GENERATION: &str = "generation";

/// Search query text.
pub const QUERY: &str = "query";

/// Source URL being analyzed.
pub const URL: &str = "url";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search.
pub const RESULT_COUNT: &str = "result_count";
