//! Connected component analysis
//!
//! Labels every foreground region of a mask at once. Foreground is any
//! nonzero pixel, whatever the depth. Labeling is a two-pass raster scan
//! with a union-find table over provisional labels; the final labels are
//! `1..=n`, numbered in raster order of each component's first pixel.

use crate::error::RegionResult;
use glandgraph_core::{Box, Pix, PixelDepth};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Neighbor offsets already visited by a forward raster scan.
    fn causal_offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &[(-1, 0), (0, -1)],
            ConnectivityType::EightWay => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
        }
    }
}

/// A connected component in an image
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedComponent {
    /// Label in the label image (`1..=n`)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

/// Disjoint-set forest over provisional labels
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // slot 0 is background
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // smaller root wins so the representative is the earliest label
            let (lo, hi) = (ra.min(rb), ra.max(rb));
            self.parent[hi as usize] = lo;
        }
    }
}

/// Label all connected components in a mask
///
/// # Arguments
///
/// * `pix` - Input mask; nonzero pixels are foreground
/// * `connectivity` - Connectivity type
///
/// # Returns
///
/// A 32-bit image where each foreground pixel holds its component label
/// (`1..=n`, ascending in raster order of first pixel) and background is 0.
pub fn label_connected_components(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<Pix> {
    let (w, h) = (pix.width(), pix.height());
    let mut provisional = vec![0u32; w as usize * h as usize];
    let mut uf = UnionFind::new();
    let idx = |x: u32, y: u32| y as usize * w as usize + x as usize;

    for y in 0..h {
        for x in 0..w {
            if pix.get_pixel_unchecked(x, y) == 0 {
                continue;
            }
            let mut current = 0u32;
            for &(dx, dy) in connectivity.causal_offsets() {
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if nx < 0 || ny < 0 || nx >= w as i32 {
                    continue;
                }
                let neighbor = provisional[idx(nx as u32, ny as u32)];
                if neighbor == 0 {
                    continue;
                }
                if current == 0 {
                    current = neighbor;
                } else {
                    uf.union(current, neighbor);
                }
            }
            if current == 0 {
                current = uf.make_set();
            }
            provisional[idx(x, y)] = current;
        }
    }

    // Provisional labels are created in raster order and every root is the
    // smallest label of its set, so renumbering roots in increasing order
    // numbers components by their first pixel.
    let mut final_label = vec![0u32; uf.parent.len()];
    let mut next = 0u32;
    for l in 1..uf.parent.len() as u32 {
        let root = uf.find(l);
        if root == l {
            next += 1;
            final_label[l as usize] = next;
        }
    }

    let mut out = Pix::new(w, h, PixelDepth::Bit32)?.to_mut();
    out.set_spp(1);
    for y in 0..h {
        for x in 0..w {
            let p = provisional[idx(x, y)];
            if p != 0 {
                let root = uf.find(p);
                out.set_pixel_unchecked(x, y, final_label[root as usize]);
            }
        }
    }
    log::debug!(
        "labeled {} components in {}x{} mask ({:?})",
        next,
        w,
        h,
        connectivity
    );
    Ok(out.into())
}

/// Find all connected components in a mask
///
/// Returns one entry per component, ordered by label.
pub fn find_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let labeled = label_connected_components(pix, connectivity)?;
    let mut comps: Vec<ConnectedComponent> = Vec::new();

    for y in 0..labeled.height() {
        for x in 0..labeled.width() {
            let label = labeled.get_pixel_unchecked(x, y);
            if label == 0 {
                continue;
            }
            let i = (label - 1) as usize;
            if i == comps.len() {
                comps.push(ConnectedComponent {
                    label,
                    pixel_count: 0,
                    bounds: Box::new_unchecked(x as i32, y as i32, 1, 1),
                });
            }
            let comp = &mut comps[i];
            comp.pixel_count += 1;
            comp.bounds.include(x as i32, y as i32);
        }
    }
    Ok(comps)
}
