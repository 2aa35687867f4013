//! Euclidean distance to the nearest foreground pixel
//!
//! Exact squared distances computed separably: one lower-envelope pass
//! down each column, then one along each row. Both passes carry the
//! location of the nearest foreground pixel along with the distance.

use crate::error::RegionResult;
use glandgraph_core::Pix;

/// Distance of every pixel to the nearest foreground pixel of a mask
#[derive(Debug, Clone)]
pub struct DistanceMap {
    width: u32,
    height: u32,
    dist2: Vec<f64>,
    nearest: Vec<Option<(u32, u32)>>,
}

impl DistanceMap {
    /// Image width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Squared distance at `(x, y)`; `None` out of bounds or when the mask
    /// has no foreground.
    pub fn distance2(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let d = self.dist2[y as usize * self.width as usize + x as usize];
        d.is_finite().then_some(d)
    }

    /// Distance at `(x, y)`.
    pub fn distance(&self, x: u32, y: u32) -> Option<f64> {
        self.distance2(x, y).map(f64::sqrt)
    }

    /// Nearest foreground pixel to `(x, y)`.
    ///
    /// Foreground pixels are their own nearest pixel.
    pub fn nearest(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.nearest[y as usize * self.width as usize + x as usize]
    }
}

/// Compute the distance map of a mask
///
/// Nonzero pixels are foreground and have distance 0. Ties between
/// equally distant foreground pixels are broken deterministically.
///
/// # Examples
///
/// ```
/// use glandgraph_core::Pix;
/// use glandgraph_region::distance_map;
///
/// let mask = Pix::from_rows(&[&[1, 0, 0, 0], &[0, 0, 0, 0]]).unwrap();
/// let dm = distance_map(&mask).unwrap();
/// assert_eq!(dm.distance2(3, 1), Some(10.0));
/// assert_eq!(dm.nearest(3, 1), Some((0, 0)));
/// ```
pub fn distance_map(mask: &Pix) -> RegionResult<DistanceMap> {
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let mut env = Envelope::with_capacity(w.max(h));

    // columns: distance and row of the nearest foreground pixel in the column
    let mut col_dist = vec![f64::INFINITY; w * h];
    let mut col_site = vec![usize::MAX; w * h];
    let mut f = vec![0.0; h];
    let mut d = vec![0.0; h];
    let mut arg = vec![usize::MAX; h];
    for x in 0..w {
        for (y, fy) in f.iter_mut().enumerate() {
            let on = mask.get_pixel_unchecked(x as u32, y as u32) != 0;
            *fy = if on { 0.0 } else { f64::INFINITY };
        }
        env.transform(&f, &mut d, &mut arg);
        for y in 0..h {
            col_dist[y * w + x] = d[y];
            col_site[y * w + x] = arg[y];
        }
    }

    // rows: combine the column distances
    let mut dist2 = vec![f64::INFINITY; w * h];
    let mut nearest = vec![None; w * h];
    let mut f = vec![0.0; w];
    let mut d = vec![0.0; w];
    let mut arg = vec![usize::MAX; w];
    for y in 0..h {
        f.copy_from_slice(&col_dist[y * w..(y + 1) * w]);
        env.transform(&f, &mut d, &mut arg);
        for x in 0..w {
            let i = y * w + x;
            dist2[i] = d[x];
            if arg[x] != usize::MAX {
                let sx = arg[x];
                nearest[i] = Some((sx as u32, col_site[y * w + sx] as u32));
            }
        }
    }

    Ok(DistanceMap {
        width: mask.width(),
        height: mask.height(),
        dist2,
        nearest,
    })
}

/// Lower envelope of the parabolas `(q - p)^2 + f[p]`
struct Envelope {
    sites: Vec<usize>,
    starts: Vec<f64>,
}

impl Envelope {
    fn with_capacity(n: usize) -> Self {
        Self {
            sites: Vec::with_capacity(n),
            starts: Vec::with_capacity(n),
        }
    }

    /// `d[q] = min_p (q - p)^2 + f[p]` with the minimizing `p` in `arg[q]`;
    /// `usize::MAX` when every `f[p]` is infinite.
    fn transform(&mut self, f: &[f64], d: &mut [f64], arg: &mut [usize]) {
        self.sites.clear();
        self.starts.clear();
        for q in 0..f.len() {
            if !f[q].is_finite() {
                continue;
            }
            let fq = f[q] + (q * q) as f64;
            while let Some(&p) = self.sites.last() {
                let fp = f[p] + (p * p) as f64;
                let s = (fq - fp) / (2.0 * (q - p) as f64);
                if self.starts.last().is_some_and(|&z| s <= z) {
                    self.sites.pop();
                    self.starts.pop();
                } else {
                    self.sites.push(q);
                    self.starts.push(s);
                    break;
                }
            }
            if self.sites.is_empty() {
                self.sites.push(q);
                self.starts.push(f64::NEG_INFINITY);
            }
        }

        if self.sites.is_empty() {
            d.fill(f64::INFINITY);
            arg.fill(usize::MAX);
            return;
        }
        let mut k = 0;
        for q in 0..f.len() {
            while k + 1 < self.sites.len() && self.starts[k + 1] < q as f64 {
                k += 1;
            }
            let p = self.sites[k];
            let dq = q as f64 - p as f64;
            d[q] = dq * dq + f[p];
            arg[q] = p;
        }
    }
}
