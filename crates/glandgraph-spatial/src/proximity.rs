//! Radius proximity graphs
//!
//! Vertex `i` is point `i`; an edge joins two points whose Euclidean
//! distance is at most the radius.

use crate::kdtree::KdTree;
use crate::{SpatialError, SpatialResult};
use glandgraph_core::{Graph, Pta};

/// Build the radius graph of `positions` using a k-d tree.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidInput`] if `radius` is not a positive
/// finite number or a coordinate is not finite.
///
/// # Examples
///
/// ```
/// use glandgraph_core::Pta;
/// use glandgraph_spatial::build_radius_graph;
///
/// let pts: Pta = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 5.0)].into_iter().collect();
/// let g = build_radius_graph(&pts, 1.5).unwrap();
/// assert_eq!(g.vertex_count(), 3);
/// assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1)]);
/// ```
pub fn build_radius_graph(positions: &Pta, radius: f64) -> SpatialResult<Graph> {
    check_radius(radius)?;
    let tree = KdTree::new(positions)?;
    let pairs = tree.query_pairs(radius);
    log::debug!(
        "radius graph: {} points, radius {}, {} edges",
        positions.len(),
        radius,
        pairs.len()
    );
    Ok(Graph::from_edges(positions.len(), pairs)?)
}

/// Build the radius graph by testing every pair.
///
/// Quadratic in the number of points; produces the same graph as
/// [`build_radius_graph`].
pub fn brute_force_radius_graph(positions: &Pta, radius: f64) -> SpatialResult<Graph> {
    check_radius(radius)?;
    if !positions.is_finite() {
        return Err(SpatialError::InvalidInput(
            "point coordinates must be finite".to_string(),
        ));
    }

    let (xs, ys) = (positions.x_coords(), positions.y_coords());
    let r2 = radius * radius;
    let mut graph = Graph::new(positions.len());
    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            let dx = xs[i] - xs[j];
            let dy = ys[i] - ys[j];
            if dx * dx + dy * dy <= r2 {
                graph.add_edge(i, j)?;
            }
        }
    }
    Ok(graph)
}

fn check_radius(radius: f64) -> SpatialResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SpatialError::InvalidInput(format!(
            "radius must be positive and finite, got {}",
            radius
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_points() {
        let pts: Pta = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 5.0)].into_iter().collect();
        let g = build_radius_graph(&pts, 1.5).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(1, 0));
        assert_eq!(g.degree(2), 0);
    }

    #[test]
    fn test_boundary_distance_included() {
        let pts: Pta = vec![(0.0, 0.0), (3.0, 4.0)].into_iter().collect();
        assert!(build_radius_graph(&pts, 5.0).unwrap().has_edge(0, 1));
        assert!(brute_force_radius_graph(&pts, 5.0).unwrap().has_edge(0, 1));
    }

    #[test]
    fn test_bad_radius() {
        let pts: Pta = vec![(0.0, 0.0), (1.0, 0.0)].into_iter().collect();
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                build_radius_graph(&pts, r),
                Err(SpatialError::InvalidInput(_))
            ));
            assert!(brute_force_radius_graph(&pts, r).is_err());
        }
    }

    #[test]
    fn test_coincident_points_joined() {
        let pts: Pta = vec![(2.0, 2.0), (2.0, 2.0)].into_iter().collect();
        let g = build_radius_graph(&pts, 0.1).unwrap();
        assert!(g.has_edge(0, 1));
    }

    #[test]
    fn test_empty() {
        let g = build_radius_graph(&Pta::new(), 1.0).unwrap();
        assert_eq!(g.vertex_count(), 0);
    }
}
