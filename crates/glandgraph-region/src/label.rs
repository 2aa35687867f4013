//! Per-component measurements on label images
//!
//! All functions take a 32-bit label image as produced by
//! [`label_connected_components`] and return one entry per label `1..=n`,
//! at index `label - 1`.

use crate::conncomp::{ConnectivityType, label_connected_components};
use crate::error::{RegionError, RegionResult};
use glandgraph_core::{Box, Pix, PixelDepth};

fn check_labeled(labeled: &Pix) -> RegionResult<()> {
    if labeled.depth() != PixelDepth::Bit32 {
        return Err(RegionError::UnsupportedDepth {
            expected: "32-bit (labeled image)",
            actual: labeled.depth().bits(),
        });
    }
    Ok(())
}

fn max_label(labeled: &Pix) -> u32 {
    let mut max = 0;
    for y in 0..labeled.height() {
        for x in 0..labeled.width() {
            max = max.max(labeled.get_pixel_unchecked(x, y));
        }
    }
    max
}

/// Count the number of connected components
///
/// # Arguments
///
/// * `pix` - Input mask; nonzero pixels are foreground
/// * `connectivity` - Connectivity type
pub fn count_components(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<u32> {
    let labeled = label_connected_components(pix, connectivity)?;
    Ok(max_label(&labeled))
}

/// Get pixel count for each component
///
/// The index corresponds to (label - 1).
pub fn get_component_sizes(labeled: &Pix) -> RegionResult<Vec<u32>> {
    check_labeled(labeled)?;
    let mut counts = vec![0u32; max_label(labeled) as usize];
    for y in 0..labeled.height() {
        for x in 0..labeled.width() {
            let label = labeled.get_pixel_unchecked(x, y);
            if label > 0 {
                counts[label as usize - 1] += 1;
            }
        }
    }
    Ok(counts)
}

/// Component statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Component label
    pub label: u32,
    /// Bounding box
    pub bounds: Box,
    /// Number of pixels
    pub pixel_count: u32,
    /// Centroid X coordinate (column)
    pub centroid_x: f64,
    /// Centroid Y coordinate (row)
    pub centroid_y: f64,
}

/// Get area, bounding box and geometric centroid for all components
///
/// Labels with no pixels (possible in hand-made label images) are skipped.
pub fn get_component_stats(labeled: &Pix) -> RegionResult<Vec<ComponentStats>> {
    check_labeled(labeled)?;

    #[derive(Clone, Default)]
    struct Accum {
        count: u32,
        sum_x: u64,
        sum_y: u64,
        bounds: Option<Box>,
    }

    let mut acc = vec![Accum::default(); max_label(labeled) as usize];
    for y in 0..labeled.height() {
        for x in 0..labeled.width() {
            let label = labeled.get_pixel_unchecked(x, y);
            if label == 0 {
                continue;
            }
            let a = &mut acc[label as usize - 1];
            a.count += 1;
            a.sum_x += x as u64;
            a.sum_y += y as u64;
            match a.bounds.as_mut() {
                Some(b) => b.include(x as i32, y as i32),
                None => a.bounds = Some(Box::new_unchecked(x as i32, y as i32, 1, 1)),
            }
        }
    }

    Ok(acc
        .into_iter()
        .enumerate()
        .filter_map(|(i, a)| {
            let bounds = a.bounds?;
            Some(ComponentStats {
                label: i as u32 + 1,
                bounds,
                pixel_count: a.count,
                centroid_x: a.sum_x as f64 / a.count as f64,
                centroid_y: a.sum_y as f64 / a.count as f64,
            })
        })
        .collect())
}

/// Value-weighted center of mass of labels `1..=n`
///
/// Each pixel of label `l` contributes its value in `values` as weight.
/// With a binary or constant-valued mask this is the plain centroid.
///
/// # Arguments
///
/// * `values` - Weight image (1, 8 or 16 bpp), same size as `labeled`
/// * `labeled` - 32-bit label image
/// * `n` - Number of labels to measure
///
/// # Returns
///
/// `(x, y)` in raster coordinates (column, row), one per label.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if a label in `1..=n` has
/// zero total weight, since its center is undefined.
pub fn center_of_mass(values: &Pix, labeled: &Pix, n: u32) -> RegionResult<Vec<(f64, f64)>> {
    check_labeled(labeled)?;
    if values.depth() == PixelDepth::Bit32 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1, 8 or 16-bit",
            actual: 32,
        });
    }
    if values.width() != labeled.width() || values.height() != labeled.height() {
        return Err(glandgraph_core::Error::DimensionMismatch {
            expected: (labeled.width(), labeled.height()),
            actual: (values.width(), values.height()),
        }
        .into());
    }

    // (sum w, sum w*x, sum w*y)
    let mut sums = vec![(0.0f64, 0.0f64, 0.0f64); n as usize];
    for y in 0..labeled.height() {
        for x in 0..labeled.width() {
            let label = labeled.get_pixel_unchecked(x, y);
            if label == 0 || label > n {
                continue;
            }
            let w = values.get_pixel_unchecked(x, y) as f64;
            let s = &mut sums[label as usize - 1];
            s.0 += w;
            s.1 += w * x as f64;
            s.2 += w * y as f64;
        }
    }

    sums.into_iter()
        .enumerate()
        .map(|(i, (w, wx, wy))| {
            if w > 0.0 {
                Ok((wx / w, wy / w))
            } else {
                Err(RegionError::InvalidParameters(format!(
                    "label {} has zero total weight",
                    i + 1
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(rows: &[&[u8]]) -> Pix {
        let mask = Pix::from_rows(rows).unwrap();
        label_connected_components(&mask, ConnectivityType::EightWay).unwrap()
    }

    #[test]
    fn test_sizes_and_count() {
        let rows: &[&[u8]] = &[&[1, 1, 0, 0], &[0, 0, 0, 1], &[1, 0, 0, 1]];
        let mask = Pix::from_rows(rows).unwrap();
        assert_eq!(count_components(&mask, ConnectivityType::EightWay).unwrap(), 3);
        assert_eq!(get_component_sizes(&labeled(rows)).unwrap(), vec![2, 2, 1]);
    }

    #[test]
    fn test_component_stats() {
        // V shape: (0,0), (2,0), (1,1)
        let stats = get_component_stats(&labeled(&[&[1, 0, 1], &[0, 1, 0]])).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].pixel_count, 3);
        assert_eq!(stats[0].bounds, Box::new_unchecked(0, 0, 3, 2));
        assert!((stats[0].centroid_x - 1.0).abs() < 1e-12);
        assert!((stats[0].centroid_y - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_center_of_mass_weighted() {
        let values = Pix::from_rows(&[&[10, 30, 0], &[0, 0, 0], &[0, 0, 255]]).unwrap();
        let lab = label_connected_components(&values, ConnectivityType::EightWay).unwrap();
        let com = center_of_mass(&values, &lab, 2).unwrap();
        assert!((com[0].0 - 0.75).abs() < 1e-12);
        assert_eq!(com[0].1, 0.0);
        assert_eq!(com[1], (2.0, 2.0));
    }

    #[test]
    fn test_center_of_mass_missing_label() {
        let values = Pix::from_rows(&[&[1, 0]]).unwrap();
        let lab = label_connected_components(&values, ConnectivityType::EightWay).unwrap();
        assert!(center_of_mass(&values, &lab, 2).is_err());
        assert!(center_of_mass(&lab, &lab, 1).is_err());
    }
}
