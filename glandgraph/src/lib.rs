//! glandgraph - spatial graphs of glands in segmented tissue
//!
//! # Overview
//!
//! Starting from a segmentation mask, glandgraph finds the individual
//! glands and builds graphs over their positions:
//!
//! - Mask and image I/O (PNG, PNM)
//! - Flood fill and connected-component labeling
//! - Coloring objects by explicit color, scalar value or outcome
//! - Radius proximity graphs through a k-d tree
//! - Voronoi tessellations clipped to a bounding polygon
//!
//! # Example
//!
//! ```
//! use glandgraph::Pix;
//! use glandgraph::spatial::graph_from_mask;
//!
//! let mask = Pix::from_rows(&[
//!     &[255, 255, 0, 0, 0],
//!     &[255, 255, 0, 0, 255],
//!     &[0, 0, 0, 0, 255],
//! ]).unwrap();
//!
//! let (graph, centroids) = graph_from_mask(&mask, 5.0).unwrap();
//! assert_eq!(centroids.len(), 2);
//! assert!(graph.has_edge(0, 1));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use glandgraph_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use glandgraph_color as color;
pub use glandgraph_io as io;
pub use glandgraph_region as region;
pub use glandgraph_spatial as spatial;
