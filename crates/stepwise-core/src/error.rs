//! Analyzer error types
//!
//! Every failure of one decomposition call maps onto an `AnalysisError`.
//! The `Display` text is what HTTP callers see in the error envelope.

use thiserror::Error;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Missing or invalid configuration (e.g. no API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to the upstream service
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("{status} {message}")]
    Upstream { status: u16, message: String },

    /// Reply carried no function-call arguments
    #[error("No response from AI")]
    MissingPayload,

    /// Function-call arguments did not decode into an analysis
    #[error("Invalid analysis payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Failure reported by another analyzer implementation, shown verbatim
    #[error("{0}")]
    Message(String),
}

impl AnalysisError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create an error whose message is shown to callers as-is
    pub fn message<S: Into<String>>(message: S) -> Self {
        Self::Message(message.into())
    }

    /// True when the failure came from the upstream service rather than local setup
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}
