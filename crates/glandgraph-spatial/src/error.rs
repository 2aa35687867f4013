//! Error types for glandgraph-spatial

use thiserror::Error;

/// Errors that can occur while building graphs and tessellations
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glandgraph_core::Error),

    /// Region labeling error
    #[error("region error: {0}")]
    Region(#[from] glandgraph_region::RegionError),

    /// Input rejected before any work was done
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;
