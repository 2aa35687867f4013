//! glandgraph-region - finding objects in segmentation masks
//!
//! This crate provides:
//!
//! - **Seed fill** - extract the component containing one seed pixel
//! - **Connected component labeling** - label every object of a mask
//! - **Component measurements** - sizes, bounding boxes, centroids and
//!   value-weighted centers of mass
//! - **Distance map** - Euclidean distance to the nearest foreground pixel
//! - **Mask utilities** - normalize annotation masks, randomly remove objects,
//!   dilate objects without merging them
//!
//! Foreground is any nonzero pixel. Coordinates are raster `(x, y)` =
//! (column, row) with `y` growing downward.
//!
//! # Examples
//!
//! ```
//! use glandgraph_core::Pix;
//! use glandgraph_region::{FillOptions, label_component};
//!
//! let mask = Pix::from_rows(&[
//!     &[0, 0, 0, 0, 0],
//!     &[0, 1, 1, 1, 0],
//!     &[0, 1, 1, 1, 0],
//!     &[0, 1, 1, 1, 0],
//!     &[0, 0, 0, 0, 0],
//! ]).unwrap();
//!
//! let comp = label_component(&mask, 2, 2, &FillOptions::default()).unwrap();
//! assert_eq!(comp.len(), 9);
//! ```

pub mod conncomp;
pub mod distance;
pub mod error;
pub mod label;
pub mod seedfill;
pub mod select;

// Re-export core types
pub use glandgraph_core;

pub use error::{RegionError, RegionResult};

pub use conncomp::{
    ConnectedComponent, ConnectivityType, find_connected_components, label_connected_components,
};

pub use label::{
    ComponentStats, center_of_mass, count_components, get_component_sizes, get_component_stats,
};

pub use seedfill::{CHECK_INTERVAL, CancelToken, Component, FillOptions, label_component};

pub use distance::{DistanceMap, distance_map};

pub use select::{MASK_THRESHOLD, binary_dilation_no_merge, correct_mask, remove_objects};
