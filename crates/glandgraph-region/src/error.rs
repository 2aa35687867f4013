//! Error types for glandgraph-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glandgraph_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Seed lies outside the image or on a background pixel
    #[error("invalid seed ({x}, {y}): {reason}")]
    InvalidSeed {
        x: u32,
        y: u32,
        reason: &'static str,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The caller cancelled the operation
    #[error("operation cancelled after {visited} pixels")]
    Cancelled { visited: usize },

    /// The deadline passed before the operation finished
    #[error("deadline exceeded after {visited} pixels")]
    DeadlineExceeded { visited: usize },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
