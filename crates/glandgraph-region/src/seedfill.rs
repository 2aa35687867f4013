//! Seed fill: extract the component containing one seed pixel
//!
//! The fill runs breadth-first over a copy of the mask padded with one
//! background pixel on every side, so the eight neighbor lookups of any
//! visited pixel never leave the padded grid. Visited pixels are tracked
//! in a bitmap the size of the padded grid.
//!
//! Long fills on large masks can be bounded with a deadline or stopped
//! through a [`CancelToken`]; both are checked every
//! [`CHECK_INTERVAL`] dequeued pixels.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use glandgraph_core::{Box, Pix};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Number of dequeued pixels between deadline / cancellation checks
pub const CHECK_INTERVAL: usize = 4096;

const FOUR_NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const EIGHT_NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Shared flag that asks a running fill to stop.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for [`label_component`]
#[derive(Debug, Clone)]
pub struct FillOptions {
    /// Connectivity type
    pub connectivity: ConnectivityType,
    /// Give up with [`RegionError::DeadlineExceeded`] after this instant
    pub deadline: Option<Instant>,
    /// Give up with [`RegionError::Cancelled`] once this token is cancelled
    pub cancel: Option<CancelToken>,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityType::EightWay,
            deadline: None,
            cancel: None,
        }
    }
}

impl FillOptions {
    /// Create options with the specified connectivity
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    /// Set the deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the cancellation token
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn check(&self, visited: usize) -> RegionResult<()> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(RegionError::Cancelled { visited });
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(RegionError::DeadlineExceeded { visited });
        }
        Ok(())
    }
}

/// The set of pixels reached from a seed
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Member pixels as `(x, y)` in image coordinates, sorted by row then column
    pixels: Vec<(u32, u32)>,
    /// Bounding box of the members
    bounds: Box,
}

impl Component {
    /// Member pixels as `(x, y)`, in raster order.
    pub fn pixels(&self) -> &[(u32, u32)] {
        &self.pixels
    }

    /// Number of member pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// A component always holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Check membership of `(x, y)`.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.pixels.binary_search_by(|&(px, py)| (py, px).cmp(&(y, x))).is_ok()
    }

    /// Mean member position `(x, y)`.
    pub fn centroid(&self) -> (f64, f64) {
        let n = self.pixels.len() as f64;
        let (sx, sy) = self
            .pixels
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x as f64, sy + y as f64));
        (sx / n, sy / n)
    }

    /// Bounding box of the member pixels.
    pub fn bounds(&self) -> Box {
        self.bounds
    }
}

/// Extract the connected foreground region containing a seed
///
/// # Arguments
///
/// * `mask` - Input mask; nonzero pixels are foreground. Not modified.
/// * `x`, `y` - Seed pixel (column, row)
/// * `options` - Connectivity, deadline and cancellation
///
/// # Errors
///
/// * [`RegionError::InvalidSeed`] if the seed is outside the image or on
///   background
/// * [`RegionError::Cancelled`] / [`RegionError::DeadlineExceeded`] if the
///   fill was interrupted
pub fn label_component(
    mask: &Pix,
    x: u32,
    y: u32,
    options: &FillOptions,
) -> RegionResult<Component> {
    if !mask.contains(x, y) {
        return Err(RegionError::InvalidSeed {
            x,
            y,
            reason: "outside the image",
        });
    }
    if mask.get_pixel_unchecked(x, y) == 0 {
        return Err(RegionError::InvalidSeed {
            x,
            y,
            reason: "background pixel",
        });
    }

    let padded = mask.add_border(1, 0)?;
    let (pw, ph) = (padded.width(), padded.height());
    let mut visited = vec![false; pw as usize * ph as usize];
    let idx = |x: u32, y: u32| y as usize * pw as usize + x as usize;

    let offsets: &[(i32, i32)] = match options.connectivity {
        ConnectivityType::FourWay => &FOUR_NEIGHBORS,
        ConnectivityType::EightWay => &EIGHT_NEIGHBORS,
    };

    let seed = (x + 1, y + 1);
    let mut queue = VecDeque::new();
    queue.push_back(seed);
    visited[idx(seed.0, seed.1)] = true;

    let mut pixels = Vec::new();
    let mut bounds = Box::new_unchecked(x as i32, y as i32, 1, 1);

    while let Some((px, py)) = queue.pop_front() {
        if pixels.len() % CHECK_INTERVAL == CHECK_INTERVAL - 1 {
            options.check(pixels.len())?;
        }
        // padded interior maps back to the image by subtracting the border
        let (ix, iy) = (px - 1, py - 1);
        pixels.push((ix, iy));
        bounds.include(ix as i32, iy as i32);

        for &(dx, dy) in offsets {
            // foreground never touches the padded edge, so these stay in range
            let nx = (px as i32 + dx) as u32;
            let ny = (py as i32 + dy) as u32;
            let i = idx(nx, ny);
            if !visited[i] && padded.get_pixel_unchecked(nx, ny) != 0 {
                visited[i] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    pixels.sort_unstable_by_key(|&(x, y)| (y, x));
    log::debug!(
        "seed ({}, {}): component of {} pixels in {:?}",
        x,
        y,
        pixels.len(),
        bounds
    );
    Ok(Component { pixels, bounds })
}
