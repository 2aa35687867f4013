//! Unbounded Voronoi diagram
//!
//! The diagram is the dual of the Delaunay triangulation: every triangle
//! contributes the circumcenter of its corners as a Voronoi vertex, and
//! every triangulation edge is a ridge between the two points it joins.
//! Circumcenters that coincide (cocircular points) are merged into one
//! vertex, and ridges that collapse to a single vertex are dropped.

use crate::{SpatialError, SpatialResult};
use delaunator::{EMPTY, Point, next_halfedge, triangulate};

/// Relative distance below which two circumcenters are the same vertex
pub const MERGE_TOLERANCE: f64 = 1e-9;

/// Voronoi region of one input point
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// Closed region, vertex ids in cyclic order
    Bounded(Vec<usize>),
    /// Region extends to infinity (point on the convex hull)
    Unbounded,
    /// Point is absent from the triangulation (exact duplicate)
    Missing,
}

/// Boundary between the regions of two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ridge {
    /// The two points it separates, smaller index first
    pub points: (usize, usize),
    /// End vertices; `None` marks an end at infinity
    pub vertices: (Option<usize>, Option<usize>),
}

/// Voronoi diagram of a point set
#[derive(Debug, Clone)]
pub struct VoronoiDiagram {
    /// Voronoi vertices
    pub vertices: Vec<(f64, f64)>,
    /// One region per input point
    pub regions: Vec<Region>,
    /// All ridges of nonzero length
    pub ridges: Vec<Ridge>,
}

impl VoronoiDiagram {
    /// Compute the diagram of `points`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidInput`] if the points do not span a
    /// triangle (fewer than 3 distinct points, or all collinear).
    pub fn compute(points: &[(f64, f64)]) -> SpatialResult<Self> {
        let sites: Vec<Point> = points.iter().map(|&(x, y)| Point { x, y }).collect();
        let tri = triangulate(&sites);
        if tri.triangles.is_empty() {
            return Err(SpatialError::InvalidInput(format!(
                "{} points do not span a triangle",
                points.len()
            )));
        }

        let n_tri = tri.triangles.len() / 3;
        let centers: Vec<(f64, f64)> = (0..n_tri)
            .map(|t| {
                circumcenter(
                    points[tri.triangles[3 * t]],
                    points[tri.triangles[3 * t + 1]],
                    points[tri.triangles[3 * t + 2]],
                )
            })
            .collect();
        let (vertices, vertex_of) = merge_vertices(&centers, span(points) * MERGE_TOLERANCE);

        // incoming halfedge per point, preferring hull edges
        let mut incoming = vec![EMPTY; points.len()];
        for e in 0..tri.triangles.len() {
            let p = tri.triangles[next_halfedge(e)];
            if incoming[p] == EMPTY || tri.halfedges[e] == EMPTY {
                incoming[p] = e;
            }
        }

        let regions = incoming
            .iter()
            .map(|&start| {
                if start == EMPTY {
                    return Region::Missing;
                }
                let mut ids = Vec::new();
                let mut e = start;
                loop {
                    ids.push(vertex_of[e / 3]);
                    e = tri.halfedges[next_halfedge(e)];
                    if e == EMPTY {
                        return Region::Unbounded;
                    }
                    if e == start || ids.len() > tri.triangles.len() {
                        break;
                    }
                }
                ids.dedup();
                while ids.len() > 1 && ids.first() == ids.last() {
                    ids.pop();
                }
                Region::Bounded(ids)
            })
            .collect();

        let mut ridges = Vec::new();
        for e in 0..tri.triangles.len() {
            let (p, q) = (tri.triangles[e], tri.triangles[next_halfedge(e)]);
            let pair = (p.min(q), p.max(q));
            let opposite = tri.halfedges[e];
            if opposite == EMPTY {
                ridges.push(Ridge {
                    points: pair,
                    vertices: (Some(vertex_of[e / 3]), None),
                });
            } else if e < opposite {
                let (a, b) = (vertex_of[e / 3], vertex_of[opposite / 3]);
                if a != b {
                    ridges.push(Ridge {
                        points: pair,
                        vertices: (Some(a), Some(b)),
                    });
                }
            }
        }

        log::debug!(
            "voronoi: {} points, {} triangles, {} vertices, {} ridges",
            points.len(),
            n_tri,
            vertices.len(),
            ridges.len()
        );
        Ok(VoronoiDiagram {
            vertices,
            regions,
            ridges,
        })
    }
}

fn span(points: &[(f64, f64)]) -> f64 {
    let (mut xmin, mut ymin) = (f64::INFINITY, f64::INFINITY);
    let (mut xmax, mut ymax) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        xmin = xmin.min(x);
        xmax = xmax.max(x);
        ymin = ymin.min(y);
        ymax = ymax.max(y);
    }
    (xmax - xmin).max(ymax - ymin)
}

fn circumcenter(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> (f64, f64) {
    let (bx, by) = (b.0 - a.0, b.1 - a.1);
    let (cx, cy) = (c.0 - a.0, c.1 - a.1);
    let d = 2.0 * (bx * cy - by * cx);
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    (
        a.0 + (cy * b2 - by * c2) / d,
        a.1 + (bx * c2 - cx * b2) / d,
    )
}

/// Merge points closer than `tol`; returns the merged points and the new
/// id of every input point.
fn merge_vertices(centers: &[(f64, f64)], tol: f64) -> (Vec<(f64, f64)>, Vec<usize>) {
    let mut order: Vec<usize> = (0..centers.len()).collect();
    order.sort_unstable_by(|&a, &b| centers[a].0.total_cmp(&centers[b].0));

    let mut rep: Vec<usize> = (0..centers.len()).collect();
    for (k, &i) in order.iter().enumerate() {
        if rep[i] != i {
            continue;
        }
        for &j in &order[k + 1..] {
            if centers[j].0 - centers[i].0 > tol {
                break;
            }
            if rep[j] == j && (centers[j].1 - centers[i].1).abs() <= tol {
                rep[j] = i;
            }
        }
    }

    let mut new_id = vec![usize::MAX; centers.len()];
    let mut merged = Vec::new();
    for i in 0..centers.len() {
        if rep[i] == i {
            new_id[i] = merged.len();
            merged.push(centers[i]);
        }
    }
    let vertex_of = (0..centers.len()).map(|i| new_id[rep[i]]).collect();
    (merged, vertex_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circumcenter() {
        let c = circumcenter((0.0, 0.0), (2.0, 0.0), (0.0, 2.0));
        assert!((c.0 - 1.0).abs() < 1e-12 && (c.1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_vertices() {
        let (merged, ids) =
            merge_vertices(&[(1.0, 1.0), (5.0, 0.0), (1.0 + 1e-12, 1.0), (1.0, 3.0)], 1e-9);
        assert_eq!(merged.len(), 3);
        assert_eq!(ids[0], ids[2]);
        assert_ne!(ids[0], ids[3]);
    }

    #[test]
    fn test_square_with_center() {
        // center point is the only bounded region
        let pts = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (1.0, 0.9)];
        let vor = VoronoiDiagram::compute(&pts).unwrap();
        assert_eq!(vor.regions[0], Region::Unbounded);
        let Region::Bounded(ids) = &vor.regions[4] else {
            panic!("center region is not bounded: {:?}", vor.regions[4]);
        };
        assert_eq!(ids.len(), 4);
        // every cell vertex is equidistant from the center and some corner
        for &(x, y) in ids.iter().map(|&v| &vor.vertices[v]) {
            let d = ((x - 1.0).powi(2) + (y - 0.9).powi(2)).sqrt();
            let nearest = pts[..4]
                .iter()
                .map(|p| ((x - p.0).powi(2) + (y - p.1).powi(2)).sqrt())
                .fold(f64::INFINITY, f64::min);
            assert!((d - nearest).abs() < 1e-9);
        }
        let center_ridges = vor
            .ridges
            .iter()
            .filter(|r| r.points.1 == 4 || r.points.0 == 4)
            .count();
        assert_eq!(center_ridges, 4);
    }

    #[test]
    fn test_cocircular_ridge_dropped() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let vor = VoronoiDiagram::compute(&pts).unwrap();
        // the diagonal collapses to the single center vertex
        assert_eq!(vor.vertices.len(), 1);
        assert!(vor.ridges.iter().all(|r| r.points != (0, 2) && r.points != (1, 3)));
        assert_eq!(vor.ridges.len(), 4);
    }

    #[test]
    fn test_collinear_rejected() {
        let pts = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
        assert!(VoronoiDiagram::compute(&pts).is_err());
    }
}
