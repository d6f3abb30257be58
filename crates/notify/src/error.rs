//! Error types for the notify crate.

use thiserror::Error;

/// Errors that can occur while delivering a notification
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The sink answered with something other than its success status
    #[error("Notification sink returned status {0}")]
    Status(u16),

    /// The report could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, NotifyError>;
