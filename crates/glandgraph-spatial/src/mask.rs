//! Graphs and tessellations straight from a segmentation mask
//!
//! Objects are the 8-connected components of the mask, numbered in raster
//! order of their first pixel. Each object is represented by its center of
//! mass weighted by the mask values, moved from raster coordinates (row
//! down) to plane coordinates (y up): `x' = x`, `y' = height - y`.
//! Object `i` is graph vertex `i`.

use crate::proximity::build_radius_graph;
use crate::tessellation::{Tessellation, voronoi};
use crate::{SpatialError, SpatialResult};
use glandgraph_core::{Graph, Pix, Pta};
use glandgraph_region::{
    ConnectivityType, center_of_mass, get_component_sizes, label_connected_components,
};

/// Plane-coordinate centers of mass of the objects in `mask`.
///
/// # Errors
///
/// Fails if the mask is 32 bpp or an object has zero total weight.
pub fn mask_centroids(mask: &Pix) -> SpatialResult<Pta> {
    let labeled = label_connected_components(mask, ConnectivityType::EightWay)?;
    let n = get_component_sizes(&labeled)?.len() as u32;
    let centers = center_of_mass(mask, &labeled, n)?;

    let height = mask.height() as f64;
    let centroids: Pta = centers.into_iter().map(|(x, y)| (x, height - y)).collect();
    log::debug!(
        "mask {}x{}: {} objects",
        mask.width(),
        mask.height(),
        centroids.len()
    );
    Ok(centroids)
}

/// Radius graph of the objects in `mask`.
///
/// Returns the graph and the object centroids in plane coordinates.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidInput`] for a non-positive or non-finite
/// radius, checked before the mask is labeled.
pub fn graph_from_mask(mask: &Pix, radius: f64) -> SpatialResult<(Graph, Pta)> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SpatialError::InvalidInput(format!(
            "radius must be positive and finite, got {}",
            radius
        )));
    }
    let centroids = mask_centroids(mask)?;
    let graph = build_radius_graph(&centroids, radius)?;
    Ok((graph, centroids))
}

/// Voronoi tessellation of the objects in `mask`, bounded by the box of
/// their centroids.
///
/// # Errors
///
/// Fails as [`voronoi`] does when the mask has too few objects.
pub fn voronoi_from_mask(mask: &Pix) -> SpatialResult<(Tessellation, Pta)> {
    let centroids = mask_centroids(mask)?;
    let tess = voronoi(&centroids, None)?;
    Ok((tess, centroids))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Pix {
        Pix::from_rows(&[
            &[255, 255, 0, 0, 0, 0],
            &[255, 255, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 255],
            &[0, 0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_centroids_flipped() {
        let c = mask_centroids(&blobs()).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(0), Some((0.5, 3.5)));
        assert_eq!(c.get(1), Some((5.0, 2.0)));
    }

    #[test]
    fn test_graph_from_mask() {
        let (g, c) = graph_from_mask(&blobs(), 5.0).unwrap();
        assert_eq!(c.len(), 2);
        // distance sqrt(4.5^2 + 1.5^2) ~ 4.74
        assert!(g.has_edge(0, 1));
        let (g, _) = graph_from_mask(&blobs(), 4.0).unwrap();
        assert_eq!(g.edge_count(), 0);
        assert!(matches!(
            graph_from_mask(&blobs(), 0.0),
            Err(SpatialError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_voronoi_from_mask_needs_three_objects() {
        assert!(voronoi_from_mask(&blobs()).is_err());
    }
}
