//! Polygon - simple closed polygons in the plane
//!
//! Voronoi cells and bounding regions are stored as ordered vertex lists.
//! The closing edge from the last vertex back to the first is implicit;
//! the first vertex is never repeated at the end.

use crate::error::{Error, Result};
use crate::pta::Pta;

/// A simple polygon given by its vertices in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Pta,
}

impl Polygon {
    /// Create a polygon from ordered vertices.
    ///
    /// A trailing vertex equal to the first one is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if fewer than 3 vertices remain
    /// or any coordinate is not finite.
    pub fn new(mut vertices: Pta) -> Result<Self> {
        let n = vertices.len();
        if n > 1 && vertices.get(0) == vertices.get(n - 1) {
            vertices = vertices.iter().take(n - 1).collect();
        }
        if vertices.len() < 3 {
            return Err(Error::InvalidParameter(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if !vertices.is_finite() {
            return Err(Error::InvalidParameter(
                "polygon vertices must be finite".to_string(),
            ));
        }
        Ok(Self { vertices })
    }

    /// Axis-aligned rectangle `[xmin, xmax] x [ymin, ymax]`, counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle has zero or negative extent.
    pub fn rectangle(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        if !(xmax > xmin && ymax > ymin) {
            return Err(Error::InvalidParameter(format!(
                "degenerate rectangle [{xmin}, {xmax}] x [{ymin}, {ymax}]"
            )));
        }
        let vertices: Pta = [(xmin, ymin), (xmax, ymin), (xmax, ymax), (xmin, ymax)]
            .into_iter()
            .collect();
        Ok(Self { vertices })
    }

    /// Get the vertices.
    #[inline]
    pub fn vertices(&self) -> &Pta {
        &self.vertices
    }

    /// Get the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Signed area (shoelace); positive for counter-clockwise order.
    pub fn signed_area(&self) -> f64 {
        let n = self.len();
        let mut sum = 0.0;
        for i in 0..n {
            let (x0, y0) = self.vertex(i);
            let (x1, y1) = self.vertex((i + 1) % n);
            sum += x0 * y1 - x1 * y0;
        }
        0.5 * sum
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Coordinate range as `(x_min, y_min, x_max, y_max)`.
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        self.vertices.bounding_box()
    }

    /// Check whether `(x, y)` lies strictly inside the polygon.
    ///
    /// Points on an edge or a vertex are outside.
    pub fn contains_strict(&self, x: f64, y: f64) -> bool {
        let n = self.len();
        let mut inside = false;
        for i in 0..n {
            let (x0, y0) = self.vertex(i);
            let (x1, y1) = self.vertex((i + 1) % n);
            if on_segment(x, y, x0, y0, x1, y1) {
                return false;
            }
            if (y0 > y) != (y1 > y) {
                let xc = x0 + (y - y0) * (x1 - x0) / (y1 - y0);
                if x < xc {
                    inside = !inside;
                }
            }
        }
        inside
    }

    #[inline]
    fn vertex(&self, i: usize) -> (f64, f64) {
        (self.vertices.x_coords()[i], self.vertices.y_coords()[i])
    }
}

fn on_segment(px: f64, py: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
    let cross = (x1 - x0) * (py - y0) - (y1 - y0) * (px - x0);
    let scale = (x1 - x0).abs().max((y1 - y0).abs()).max(1.0);
    if cross.abs() > 1e-12 * scale * scale {
        return false;
    }
    px >= x0.min(x1) && px <= x0.max(x1) && py >= y0.min(y1) && py <= y0.max(y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_area() {
        let r = Polygon::rectangle(0.0, 0.0, 10.0, 4.0).unwrap();
        assert_eq!(r.len(), 4);
        assert_eq!(r.signed_area(), 40.0);
        assert_eq!(r.area(), 40.0);
        assert!(Polygon::rectangle(0.0, 0.0, 0.0, 4.0).is_err());
    }

    #[test]
    fn test_closed_ring_is_opened() {
        let ring: Pta = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]
            .into_iter()
            .collect();
        let tri = Polygon::new(ring).unwrap();
        assert_eq!(tri.len(), 3);
        assert!((tri.area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_vertices() {
        let pts: Pta = [(0.0, 0.0), (1.0, 0.0)].into_iter().collect();
        assert!(Polygon::new(pts).is_err());
    }

    #[test]
    fn test_contains_strict() {
        let r = Polygon::rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(r.contains_strict(5.0, 5.0));
        assert!(!r.contains_strict(0.0, 5.0));
        assert!(!r.contains_strict(10.0, 10.0));
        assert!(!r.contains_strict(11.0, 5.0));
    }
}
