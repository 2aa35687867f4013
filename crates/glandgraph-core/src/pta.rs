//! Pta - Point arrays
//!
//! Object centers, Voronoi sites and polygon vertices are all carried as
//! arrays of `f64` coordinate pairs.
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors (SoA layout).
//!
//! # Coordinates
//!
//! A `Pta` does not know which frame its points live in. Raster
//! centroids use `(column, row)` with `y` down; points handed to the
//! spatial builders use the plane frame with `y` up.

/// Array of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pta {
    /// X coordinates
    x: Vec<f64>,
    /// Y coordinates
    y: Vec<f64>,
}

impl Pta {
    /// Create a new empty Pta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Pta with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Get a point by index.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    /// Add a point.
    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Get X coordinates as a slice.
    pub fn x_coords(&self) -> &[f64] {
        &self.x
    }

    /// Get Y coordinates as a slice.
    pub fn y_coords(&self) -> &[f64] {
        &self.y
    }

    /// Compute the coordinate range.
    ///
    /// Returns `(x_min, y_min, x_max, y_max)`, or `None` if empty.
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        let (x0, y0) = self.get(0)?;
        let init = (x0, y0, x0, y0);
        Some(self.iter().fold(init, |(xmin, ymin, xmax, ymax), (x, y)| {
            (xmin.min(x), ymin.min(y), xmax.max(x), ymax.max(y))
        }))
    }

    /// Check that every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.y.iter()).all(|v| v.is_finite())
    }

    /// Create an iterator over points.
    pub fn iter(&self) -> PtaIter<'_> {
        PtaIter {
            pta: self,
            index: 0,
        }
    }
}

/// Iterator over Pta points.
pub struct PtaIter<'a> {
    pta: &'a Pta,
    index: usize,
}

impl Iterator for PtaIter<'_> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let pt = self.pta.get(self.index)?;
        self.index += 1;
        Some(pt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pta.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PtaIter<'_> {}

impl<'a> IntoIterator for &'a Pta {
    type Item = (f64, f64);
    type IntoIter = PtaIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(f64, f64)> for Pta {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut pta = Self::with_capacity(iter.size_hint().0);
        for (x, y) in iter {
            pta.push(x, y);
        }
        pta
    }
}
