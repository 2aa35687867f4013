//! Bounded Voronoi tessellation
//!
//! The unbounded diagram is computed with four auxiliary points placed one
//! span beyond each corner of the points' bounding box, so that every real
//! point gets a closed region. Each region is then clipped to the bounding
//! polygon. The auxiliary points are vertices `n..n + 4` of the adjacency
//! graph until they are deleted at the end.
//!
//! Two cells are adjacent when their ridge has at least one finite end
//! strictly inside the bounding polygon. A ridge that crosses the region
//! with both ends outside does not produce an edge.

use crate::voronoi::{Region, VoronoiDiagram};
use crate::{SpatialError, SpatialResult};
use geo::orient::{Direction, Orient};
use geo::{Area, BooleanOps, Coord, LineString};
use glandgraph_core::{AttributeValues, Graph, Polygon, Pta};
use rand::Rng;

/// Number of auxiliary points added around the input
pub const AUX_POINTS: usize = 4;

/// Default relative tolerance for the border test
pub const BORDER_TOLERANCE: f64 = 1e-9;

/// Options for [`voronoi_with_options`]
#[derive(Debug, Clone)]
pub struct VoronoiOptions {
    /// A cell is on the border when clipping removed more than this
    /// fraction of its raw area
    pub border_tolerance: f64,
}

impl Default for VoronoiOptions {
    fn default() -> Self {
        Self {
            border_tolerance: BORDER_TOLERANCE,
        }
    }
}

impl VoronoiOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relative border tolerance
    pub fn with_border_tolerance(mut self, tolerance: f64) -> Self {
        self.border_tolerance = tolerance;
        self
    }
}

/// Clipped cell of one input point
#[derive(Debug, Clone)]
pub struct VoronoiCell {
    /// Index of the point
    pub point: usize,
    /// Cell clipped to the bounding region
    pub polygon: Polygon,
    /// Area of the cell before clipping
    pub raw_area: f64,
    /// True if clipping cut the cell
    pub is_border: bool,
}

/// Why a point has no cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// Region reaches infinity
    Unbounded,
    /// Point did not take part in the triangulation
    Missing,
    /// Region has fewer than 3 distinct vertices
    TooFewVertices,
    /// Nothing of the region is left inside the bounding polygon
    ClippedAway,
}

/// A point whose cell could not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellIssue {
    /// Region could not be turned into a clipped polygon
    DegenerateGeometry {
        /// Index of the point
        point: usize,
        /// What went wrong
        reason: DegenerateReason,
    },
}

impl CellIssue {
    /// Index of the affected point
    pub fn point(&self) -> usize {
        match *self {
            CellIssue::DegenerateGeometry { point, .. } => point,
        }
    }
}

/// Result of a bounded tessellation
#[derive(Debug, Clone)]
pub struct Tessellation {
    /// Adjacency graph; vertex `i` is point `i`, with `is_border` (bool)
    /// and `position` (point) attributes
    pub graph: Graph,
    /// Cells in point order; points listed in `issues` have none
    pub cells: Vec<VoronoiCell>,
    /// Points without a cell
    pub issues: Vec<CellIssue>,
    /// Bounding region the cells were clipped to
    pub region: Polygon,
}

impl Tessellation {
    /// Cell of a point, if it has one.
    pub fn cell(&self, point: usize) -> Option<&VoronoiCell> {
        self.cells
            .binary_search_by_key(&point, |c| c.point)
            .ok()
            .map(|i| &self.cells[i])
    }

    /// Border flag per point; points without a cell are `false`.
    pub fn border_flags(&self) -> Vec<bool> {
        let mut flags = vec![false; self.graph.vertex_count()];
        for cell in &self.cells {
            flags[cell.point] = cell.is_border;
        }
        flags
    }

    /// Sum of the clipped cell areas.
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(|c| c.polygon.area()).sum()
    }
}

/// Tessellate the plane around `points` inside `region`.
///
/// `region` defaults to the axis-aligned bounding box of the points.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidInput`] for fewer than 2 points,
/// non-finite coordinates or a region of zero area. Two points, or
/// collinear points, are fine as long as the region has an area.
///
/// # Examples
///
/// ```
/// use glandgraph_core::Pta;
/// use glandgraph_spatial::voronoi;
///
/// let pts: Pta = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
///     .into_iter()
///     .collect();
/// let tess = voronoi(&pts, None).unwrap();
/// assert_eq!(tess.cells.len(), 4);
/// assert!((tess.total_area() - 100.0).abs() < 1e-9);
/// assert_eq!(tess.graph.edge_count(), 4);
/// ```
pub fn voronoi(points: &Pta, region: Option<&Polygon>) -> SpatialResult<Tessellation> {
    voronoi_with_options(points, region, &VoronoiOptions::default())
}

/// Tessellate with explicit options.
pub fn voronoi_with_options(
    points: &Pta,
    region: Option<&Polygon>,
    options: &VoronoiOptions,
) -> SpatialResult<Tessellation> {
    let n = points.len();
    let (xmin, ymin, xmax, ymax) = check_points(points)?;
    let region = match region {
        Some(r) => r.clone(),
        None => Polygon::rectangle(xmin, ymin, xmax, ymax)
            .map_err(|e| SpatialError::InvalidInput(e.to_string()))?,
    };
    if region.area() <= 0.0 {
        return Err(SpatialError::InvalidInput(
            "bounding region has zero area".to_string(),
        ));
    }

    let scale = (xmax - xmin).max(ymax - ymin);
    let mut sites: Vec<(f64, f64)> = points.iter().collect();
    sites.extend([
        (xmin - scale, ymin - scale),
        (xmax + scale, ymin - scale),
        (xmax + scale, ymax + scale),
        (xmin - scale, ymax + scale),
    ]);
    let diagram = VoronoiDiagram::compute(&sites)?;

    let clip_region = to_geo(&region.vertices().iter().collect::<Vec<_>>());
    let mut cells = Vec::with_capacity(n);
    let mut issues = Vec::new();
    for point in 0..n {
        match clip_cell(&diagram, point, &clip_region, options) {
            Ok(cell) => cells.push(cell),
            Err(reason) => {
                log::warn!("voronoi: point {} has no cell ({:?})", point, reason);
                issues.push(CellIssue::DegenerateGeometry { point, reason });
            }
        }
    }

    let mut graph = Graph::new(n + AUX_POINTS);
    for ridge in &diagram.ridges {
        let inside = [ridge.vertices.0, ridge.vertices.1]
            .into_iter()
            .flatten()
            .any(|v| {
                let (x, y) = diagram.vertices[v];
                region.contains_strict(x, y)
            });
        if inside {
            graph.add_edge(ridge.points.0, ridge.points.1)?;
        }
    }
    graph.delete_vertices(n..n + AUX_POINTS)?;

    let mut is_border = vec![false; n];
    for cell in &cells {
        is_border[cell.point] = cell.is_border;
    }
    graph.set_attribute("is_border", AttributeValues::Bool(is_border))?;
    graph.set_attribute("position", AttributeValues::Point(points.iter().collect()))?;

    log::debug!(
        "tessellation: {} points, {} cells, {} issues, {} edges",
        n,
        cells.len(),
        issues.len(),
        graph.edge_count()
    );
    Ok(Tessellation {
        graph,
        cells,
        issues,
        region,
    })
}

/// `n` points drawn uniformly from the unit square.
pub fn random_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Pta {
    (0..n)
        .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
        .collect()
}

/// Tessellate `n` random points from the unit square.
///
/// Returns the tessellation together with the generated points.
pub fn voronoi_random<R: Rng + ?Sized>(
    n: usize,
    region: Option<&Polygon>,
    rng: &mut R,
) -> SpatialResult<(Tessellation, Pta)> {
    let points = random_points(n, rng);
    let tess = voronoi(&points, region)?;
    Ok((tess, points))
}

/// Validates the input and returns its bounding box.
fn check_points(points: &Pta) -> SpatialResult<(f64, f64, f64, f64)> {
    if points.len() < 2 {
        return Err(SpatialError::InvalidInput(format!(
            "at least 2 points are required, got {}",
            points.len()
        )));
    }
    if !points.is_finite() {
        return Err(SpatialError::InvalidInput(
            "point coordinates must be finite".to_string(),
        ));
    }

    points
        .bounding_box()
        .ok_or_else(|| SpatialError::InvalidInput("no points".to_string()))
}

fn clip_cell(
    diagram: &VoronoiDiagram,
    point: usize,
    clip_region: &geo::Polygon<f64>,
    options: &VoronoiOptions,
) -> Result<VoronoiCell, DegenerateReason> {
    let coords = match &diagram.regions[point] {
        Region::Bounded(ids) if ids.len() >= 3 => {
            ids.iter().map(|&v| diagram.vertices[v]).collect::<Vec<_>>()
        }
        Region::Bounded(_) => return Err(DegenerateReason::TooFewVertices),
        Region::Unbounded => return Err(DegenerateReason::Unbounded),
        Region::Missing => return Err(DegenerateReason::Missing),
    };
    let raw = to_geo(&coords);
    let raw_area = raw.unsigned_area();

    let clipped = raw.intersection(clip_region);
    let first = clipped.0.first().ok_or(DegenerateReason::ClippedAway)?;
    let area = first.unsigned_area();
    if area <= 0.0 {
        return Err(DegenerateReason::ClippedAway);
    }
    let ring: Pta = first.exterior().coords().map(|c| (c.x, c.y)).collect();
    let polygon = Polygon::new(ring).map_err(|_| DegenerateReason::ClippedAway)?;

    Ok(VoronoiCell {
        point,
        is_border: raw_area - area > options.border_tolerance * raw_area,
        polygon,
        raw_area,
    })
}

/// Counter-clockwise `geo` polygon from a vertex ring.
fn to_geo(coords: &[(f64, f64)]) -> geo::Polygon<f64> {
    let ring: Vec<Coord<f64>> = coords.iter().map(|&(x, y)| Coord { x, y }).collect();
    geo::Polygon::new(LineString::new(ring), vec![]).orient(Direction::Default)
}
