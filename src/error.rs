//! Error types for Pulse.
//!
//! All fallible operations in the crate return [`Result`], whose error type is
//! [`PulseError`]. Search failures that should be shown to the user are not
//! errors: the search pipeline turns them into
//! [`SearchOutcome`](crate::search::SearchOutcome) values instead.
//!
//! # Examples
//!
//! ```
//! use pulse::error::{PulseError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(PulseError::config("missing API key"))
//! }
//!
//! assert_eq!(
//!     load().unwrap_err().to_string(),
//!     "Configuration error: missing API key"
//! );
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Pulse operations.
#[derive(Error, Debug)]
pub enum PulseError {
    /// I/O errors (config files, terminal input)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network or transport failure talking to the news source
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The query was empty after trimming whitespace
    #[error("Query is empty")]
    EmptyQuery,

    /// The ranker was asked to rank zero candidates
    #[error("No candidate documents to rank")]
    EmptyCandidates,

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with PulseError.
pub type Result<T> = std::result::Result<T, PulseError>;

impl PulseError {
    /// Create a new transport error.
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        PulseError::Transport(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PulseError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PulseError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PulseError::Other(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        PulseError::Transport(format!("Timeout: {}", msg.into()))
    }
}

impl From<reqwest::Error> for PulseError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter.
        let err = err.without_url();
        if err.is_timeout() {
            PulseError::timeout(err.to_string())
        } else {
            PulseError::Transport(err.to_string())
        }
    }
}
