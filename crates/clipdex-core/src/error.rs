//! Error types for clipdex.

use thiserror::Error;

/// Result type alias using clipdex's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for clipdex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Local validation failed; never sent to a collaborator.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The analysis gateway exceeded its processing budget (HTTP 504).
    #[error("Gateway timeout")]
    Timeout,

    /// The collaborator is rate limiting us (HTTP 429).
    #[error("Rate limited")]
    RateLimited,

    /// The collaborator returned a detail-bearing error body.
    #[error("Server error: {0}")]
    Server(String),

    /// HTTP/network request failed with no usable detail.
    #[error("Request error: {0}")]
    Request(String),

    /// Persisting a reviewed record failed.
    #[error("Save error: {0}")]
    Save(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout
        } else {
            Error::Request(e.to_string())
        }
    }
}

impl Error {
    /// Operator-facing message for a failed analysis run.
    ///
    /// Pure function of the error shape: known transport failures map to
    /// actionable text, everything else falls back to a generic string.
    pub fn analyze_message(&self) -> String {
        match self {
            Error::Timeout => {
                "The AI is taking too long to respond (Timeout). Please try a shorter video (< 1 min)."
                    .to_string()
            }
            Error::RateLimited => "Rate Limit exceeded. Please wait a minute.".to_string(),
            Error::Server(detail) => format!("Error: {detail}"),
            _ => "Failed to analyze video. Please check backend.".to_string(),
        }
    }

    /// Operator-facing message for a failed search run.
    pub fn search_message(&self) -> String {
        match self {
            Error::Timeout => "Search timed out.".to_string(),
            Error::Server(detail) => format!("Error: {detail}"),
            _ => "Error accessing database index.".to_string(),
        }
    }

    /// Operator-facing message for a failed save.
    pub fn save_message(&self) -> String {
        match self {
            Error::Server(detail) => format!("Error: {detail}"),
            _ => "Failed to save video. Please check backend.".to_string(),
        }
    }
}
