//! Error types for Attention Trace

use thiserror::Error;

/// Errors that can occur while parsing, validating, or encoding a pointer trace
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to parse pointer trace: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid sample at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Create an invalid input error for the sample at `index`
    pub fn invalid_input(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index,
            reason: reason.into(),
        }
    }
}
