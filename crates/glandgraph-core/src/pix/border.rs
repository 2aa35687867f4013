//! Border operations for images
//!
//! Adding and removing uniform borders (padding) around images. The flood
//! fill pads masks with one background pixel so neighbor lookups never
//! leave the image.

use super::Pix;
use crate::error::{Error, Result};

impl Pix {
    /// Add a uniform border around the image.
    ///
    /// Creates a new image with `npix` pixels of border on all sides,
    /// filled with `val`. Pixel `(x, y)` of the source lands at
    /// `(x + npix, y + npix)`.
    ///
    /// # Errors
    ///
    /// Returns error if the padded dimensions overflow.
    pub fn add_border(&self, npix: u32, val: u32) -> Result<Pix> {
        let (w, h) = (self.width(), self.height());
        let (wd, hd) = match (
            w.checked_add(2 * npix),
            h.checked_add(2 * npix),
        ) {
            (Some(wd), Some(hd)) => (wd, hd),
            _ => return Err(Error::InvalidDimension { width: w, height: h }),
        };

        let mut pm = Pix::new(wd, hd, self.depth())?.to_mut();
        pm.set_spp(self.spp());
        if val != 0 {
            pm.fill(val);
        }
        for y in 0..h {
            for x in 0..w {
                pm.set_pixel_unchecked(x + npix, y + npix, self.get_pixel_unchecked(x, y));
            }
        }
        Ok(pm.into())
    }

    /// Remove a uniform border from the image.
    ///
    /// # Errors
    ///
    /// Returns error if the border is not smaller than half the image.
    pub fn remove_border(&self, npix: u32) -> Result<Pix> {
        let (w, h) = (self.width(), self.height());
        if 2 * npix >= w || 2 * npix >= h {
            return Err(Error::InvalidParameter(format!(
                "border {npix} too large for {w}x{h} image"
            )));
        }
        let mut pm = Pix::new(w - 2 * npix, h - 2 * npix, self.depth())?.to_mut();
        pm.set_spp(self.spp());
        for y in 0..h - 2 * npix {
            for x in 0..w - 2 * npix {
                pm.set_pixel_unchecked(x, y, self.get_pixel_unchecked(x + npix, y + npix));
            }
        }
        Ok(pm.into())
    }
}
