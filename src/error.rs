//! Error types for the highlight engine

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlight engine error type
///
/// Anchor resolution failure is deliberately *not* represented here:
/// a record that cannot be re-located is skipped, not an error.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid range: {0}")]
    InvalidRange(String),
}

impl From<anyhow::Error> for HighlightError {
    fn from(err: anyhow::Error) -> Self {
        HighlightError::Storage(err.to_string())
    }
}
