//! Error types for the graph-client crate.
//!
//! Every read-side failure is fatal to a run, so the variants carry enough
//! context (status, url) for the binary to report what went wrong.

use thiserror::Error;

/// Errors that can occur when talking to the social-graph API
#[derive(Error, Debug)]
pub enum GraphError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON shape
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The credential can't be carried in an HTTP header
    #[error("Invalid API token: {0}")]
    InvalidToken(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, GraphError>;
