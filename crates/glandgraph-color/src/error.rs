//! Error types for glandgraph-color

use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glandgraph_core::Error),

    /// Region labeling error
    #[error("region error: {0}")]
    Region(#[from] glandgraph_region::RegionError),

    /// Missing or contradictory input, rejected before any painting
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
