//! Painting objects of a mask
//!
//! Each seed names one object. The object is extracted with the seed fill
//! labeler and all of its pixels are painted with the seed's color on a
//! black RGB canvas of the same size as the mask.
//!
//! Colors come either from an explicit list or from one scalar per seed,
//! min-max normalized and looked up in a [`ColorScale`].

use crate::colormap::{ColorScale, OutcomeColor};
use crate::{ColorError, ColorResult};
use glandgraph_core::{Pix, PixelDepth, color};
use glandgraph_region::{FillOptions, label_component};

/// Options for [`colorize`]
#[derive(Debug, Clone, Default)]
pub struct ColorizeOptions {
    /// One RGB triple per seed
    pub colors: Option<Vec<(u8, u8, u8)>>,
    /// One scalar per seed, mapped through `scale`
    pub values: Option<Vec<f64>>,
    /// Scale used with `values`
    pub scale: ColorScale,
    /// Options passed to the seed fill
    pub fill: FillOptions,
}

impl ColorizeOptions {
    /// Create options with no color source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint with explicit colors
    pub fn with_colors(mut self, colors: Vec<(u8, u8, u8)>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Paint with per-seed scalar values
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.values = Some(values);
        self
    }

    /// Set the color scale used with values
    pub fn with_scale(mut self, scale: ColorScale) -> Self {
        self.scale = scale;
        self
    }

    /// Set the seed fill options
    pub fn with_fill_options(mut self, fill: FillOptions) -> Self {
        self.fill = fill;
        self
    }
}

/// A pixel that could not be painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintIssue {
    /// The labeler returned a pixel outside the output image
    OutOfBounds {
        /// Index of the seed whose object contained the pixel
        seed_index: usize,
        /// Column
        x: u32,
        /// Row
        y: u32,
    },
}

/// Result of [`colorize`]
#[derive(Debug, Clone)]
pub struct Colorized {
    /// 32 bpp RGB image, black where nothing was painted
    pub image: Pix,
    /// Pixels skipped while painting
    pub issues: Vec<PaintIssue>,
}

impl Colorized {
    /// True if every pixel of every object was painted.
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Paint the object under each seed.
///
/// # Arguments
///
/// * `mask` - Input mask; nonzero pixels are foreground. Not modified.
/// * `seeds` - One `(x, y)` pixel inside each object
/// * `options` - Color source and fill options
///
/// # Errors
///
/// All checks run before anything is painted:
///
/// * [`ColorError::InvalidInput`] if neither or both of `colors` and
///   `values` are given, if their length differs from `seeds`, or if a
///   value is not finite
/// * [`ColorError::Region`] if a seed is outside the image or on background
///
/// # Examples
///
/// ```
/// use glandgraph_color::{ColorizeOptions, colorize};
/// use glandgraph_core::Pix;
///
/// let mask = Pix::from_rows(&[&[255, 0, 0], &[255, 0, 255]]).unwrap();
/// let opts = ColorizeOptions::new().with_colors(vec![(255, 0, 0), (0, 0, 255)]);
/// let out = colorize(&mask, &[(0, 0), (2, 1)], &opts).unwrap();
/// assert_eq!(out.image.get_rgb(0, 1), Some((255, 0, 0)));
/// assert_eq!(out.image.get_rgb(2, 1), Some((0, 0, 255)));
/// ```
pub fn colorize(
    mask: &Pix,
    seeds: &[(u32, u32)],
    options: &ColorizeOptions,
) -> ColorResult<Colorized> {
    let colors = resolve_colors(seeds.len(), options)?;
    for &(x, y) in seeds {
        check_seed(mask, x, y)?;
    }
    paint(mask, seeds, &colors, &options.fill)
}

/// Paint the object under each seed with its outcome color.
///
/// # Errors
///
/// Same as [`colorize`], with `outcomes` taking the place of `colors`.
pub fn colorize_outcomes(
    mask: &Pix,
    seeds: &[(u32, u32)],
    outcomes: &[OutcomeColor],
) -> ColorResult<Colorized> {
    let colors = outcomes.iter().map(|o| o.rgb()).collect();
    colorize(mask, seeds, &ColorizeOptions::new().with_colors(colors))
}

/// Min-max normalize values to `[0, 1]`.
///
/// If all values are equal every value maps to 0.
pub fn normalize_values(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|&v| if range > 0.0 { (v - min) / range } else { 0.0 })
        .collect()
}

fn resolve_colors(n: usize, options: &ColorizeOptions) -> ColorResult<Vec<(u8, u8, u8)>> {
    match (&options.colors, &options.values) {
        (None, None) => Err(ColorError::InvalidInput(
            "either colors or values must be given".to_string(),
        )),
        (Some(_), Some(_)) => Err(ColorError::InvalidInput(
            "colors and values are mutually exclusive".to_string(),
        )),
        (Some(colors), None) => {
            check_len("colors", colors.len(), n)?;
            Ok(colors.clone())
        }
        (None, Some(values)) => {
            check_len("values", values.len(), n)?;
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(ColorError::InvalidInput(format!(
                    "value {} is not finite: {}",
                    i, values[i]
                )));
            }
            Ok(normalize_values(values)
                .into_iter()
                .map(|t| options.scale.sample(t))
                .collect())
        }
    }
}

fn check_len(what: &str, len: usize, n: usize) -> ColorResult<()> {
    if len != n {
        return Err(ColorError::InvalidInput(format!(
            "{} has {} entries for {} seeds",
            what, len, n
        )));
    }
    Ok(())
}

fn check_seed(mask: &Pix, x: u32, y: u32) -> ColorResult<()> {
    let reason = match mask.get_pixel(x, y) {
        None => "outside the image",
        Some(0) => "background pixel",
        Some(_) => return Ok(()),
    };
    Err(glandgraph_region::RegionError::InvalidSeed { x, y, reason }.into())
}

fn paint(
    mask: &Pix,
    seeds: &[(u32, u32)],
    colors: &[(u8, u8, u8)],
    fill: &FillOptions,
) -> ColorResult<Colorized> {
    let mut out = Pix::new(mask.width(), mask.height(), PixelDepth::Bit32)?.to_mut();
    let mut issues = Vec::new();

    for (seed_index, (&(sx, sy), &(r, g, b))) in seeds.iter().zip(colors).enumerate() {
        let comp = label_component(mask, sx, sy, fill)?;
        let val = color::compose_rgb(r, g, b);
        for &(x, y) in comp.pixels() {
            if x >= mask.width() || y >= mask.height() {
                log::warn!(
                    "seed {}: pixel ({}, {}) outside {}x{} image, not painted",
                    seed_index,
                    x,
                    y,
                    mask.width(),
                    mask.height()
                );
                issues.push(PaintIssue::OutOfBounds { seed_index, x, y });
                continue;
            }
            out.set_pixel_unchecked(x, y, val);
        }
    }

    log::debug!(
        "painted {} objects with {} issue(s)",
        seeds.len(),
        issues.len()
    );
    Ok(Colorized {
        image: out.into(),
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Pix {
        Pix::from_rows(&[
            &[255, 255, 0, 0, 0],
            &[255, 0, 0, 0, 40],
            &[0, 0, 0, 40, 40],
        ])
        .unwrap()
    }

    #[test]
    fn test_explicit_colors() {
        let mask = two_blobs();
        let opts = ColorizeOptions::new().with_colors(vec![(10, 20, 30), (200, 100, 0)]);
        let out = colorize(&mask, &[(0, 0), (4, 2)], &opts).unwrap();
        assert!(out.is_complete());
        assert_eq!(out.image.depth(), PixelDepth::Bit32);
        assert_eq!(out.image.get_rgb(1, 0), Some((10, 20, 30)));
        assert_eq!(out.image.get_rgb(3, 2), Some((200, 100, 0)));
        assert_eq!(out.image.get_rgb(2, 1), Some((0, 0, 0)));
    }

    #[test]
    fn test_values_through_scale() {
        let mask = two_blobs();
        let opts = ColorizeOptions::new()
            .with_values(vec![-2.0, 6.0])
            .with_scale(ColorScale::Gray);
        let out = colorize(&mask, &[(0, 1), (4, 1)], &opts).unwrap();
        assert_eq!(out.image.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(out.image.get_rgb(4, 1), Some((255, 255, 255)));
    }

    #[test]
    fn test_normalize_values() {
        assert_eq!(normalize_values(&[1.0, 3.0, 2.0]), vec![0.0, 1.0, 0.5]);
        assert_eq!(normalize_values(&[4.0, 4.0]), vec![0.0, 0.0]);
        assert!(normalize_values(&[]).is_empty());
    }

    #[test]
    fn test_option_errors() {
        let mask = two_blobs();
        let seeds = [(0, 0)];
        let neither = colorize(&mask, &seeds, &ColorizeOptions::new());
        assert!(matches!(neither, Err(ColorError::InvalidInput(_))));

        let short = ColorizeOptions::new().with_colors(vec![]);
        assert!(matches!(
            colorize(&mask, &seeds, &short),
            Err(ColorError::InvalidInput(_))
        ));

        let nan = ColorizeOptions::new().with_values(vec![f64::NAN]);
        assert!(matches!(
            colorize(&mask, &seeds, &nan),
            Err(ColorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bad_seed_rejected() {
        let mask = two_blobs();
        let opts = ColorizeOptions::new().with_colors(vec![(1, 1, 1), (2, 2, 2)]);
        let res = colorize(&mask, &[(0, 0), (2, 0)], &opts);
        assert!(matches!(res, Err(ColorError::Region(_))));
    }

    #[test]
    fn test_outcome_colors() {
        let mask = two_blobs();
        let out = colorize_outcomes(
            &mask,
            &[(0, 0), (4, 1)],
            &[OutcomeColor::TruePositive, OutcomeColor::FalsePositive],
        )
        .unwrap();
        assert_eq!(out.image.get_rgb(0, 1), Some((255, 0, 0)));
        assert_eq!(out.image.get_rgb(3, 2), Some((255, 255, 0)));
    }
}
