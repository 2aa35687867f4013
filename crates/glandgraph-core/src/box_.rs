//! Box - pixel-aligned rectangle regions
//!
//! Used for component bounding boxes in raster coordinates.

use crate::error::{Error, Result};

/// A rectangle region in pixel units
///
/// A small `Copy` type; `(x, y)` is the top-left pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow the box so it covers pixel `(x, y)`.
    pub fn include(&mut self, x: i32, y: i32) {
        let right = self.right().max(x + 1);
        let bottom = self.bottom().max(y + 1);
        self.x = self.x.min(x);
        self.y = self.y.min(y);
        self.w = right - self.x;
        self.h = bottom - self.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_extent() {
        let b = Box::new_unchecked(1, 2, 3, 1);
        assert_eq!(b.area(), 3);
        assert!(b.contains_point(3, 2));
        assert!(!b.contains_point(4, 2));
    }

    #[test]
    fn test_box_include() {
        let mut b = Box::new_unchecked(5, 5, 1, 1);
        b.include(2, 7);
        assert_eq!(b, Box::new_unchecked(2, 5, 4, 3));
    }

    #[test]
    fn test_box_negative() {
        assert!(Box::new(0, 0, -1, 2).is_err());
    }
}
