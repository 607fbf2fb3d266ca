//! Error types shared by the LedKit crates.

use thiserror::Error;

/// Errors raised while building or configuring LEDs.
#[derive(Debug, Error)]
pub enum LedError {
    /// A shape code or name that maps to neither LED shape.
    #[error("Unsupported shape type for LED: {0}")]
    UnsupportedShape(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    /// Rectangle ratio must be finite and positive.
    #[error("Invalid rectangle ratio: {0}")]
    InvalidRatio(f64),
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for LED operations.
pub type LedResult<T> = Result<T, LedError>;
