//! glandgraph-spatial - graphs over object positions
//!
//! This crate provides:
//!
//! - **k-d tree** - radius and pair queries over plane points ([`KdTree`])
//! - **Proximity graphs** - join objects closer than a radius
//!   ([`build_radius_graph`])
//! - **Voronoi diagrams** - the raw diagram ([`VoronoiDiagram`]) and the
//!   tessellation clipped to a bounding polygon, with border flags and an
//!   adjacency graph ([`voronoi`])
//! - **Mask adapters** - both graphs straight from a segmentation mask
//!   ([`graph_from_mask`], [`voronoi_from_mask`])
//!
//! Points are plane coordinates `(x, y)` with `y` growing upward. The mask
//! adapters are the only place where raster coordinates are converted.

pub mod error;
pub mod kdtree;
pub mod mask;
pub mod proximity;
pub mod tessellation;
pub mod voronoi;

pub use error::{SpatialError, SpatialResult};

pub use kdtree::{KdTree, KdTreeOptions};
pub use mask::{graph_from_mask, mask_centroids, voronoi_from_mask};
pub use proximity::{brute_force_radius_graph, build_radius_graph};
pub use tessellation::{
    AUX_POINTS, BORDER_TOLERANCE, CellIssue, DegenerateReason, Tessellation, VoronoiCell,
    VoronoiOptions, random_points, voronoi, voronoi_random, voronoi_with_options,
};
pub use voronoi::{MERGE_TOLERANCE, Region, Ridge, VoronoiDiagram};
