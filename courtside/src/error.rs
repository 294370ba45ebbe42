//! Unified error types for courtside.
//!
//! This module ties together:
//! - transcript errors (unknown quarter selectors)
//! - LLM provider errors (authentication, rate limiting, bad responses)
//! - malformed request bodies and I/O failures

pub use crate::llms::error::LlmError;
pub use crate::transcript::TranscriptError;

/// Result type alias for courtside operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for courtside.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// LLM provider error.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Transcript or selector error.
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    /// A JSON body of the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by the
    /// downstream model call.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::Transcript(_) | Self::Json(_))
    }
}
