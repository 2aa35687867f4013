//! Mask clean-up and object removal
//!
//! Ground-truth masks come from several annotation tools. Some are
//! anti-aliased or stored with dark glands on a light background;
//! [`correct_mask`] brings them to the two-valued form expected by the
//! labelers. [`remove_objects`] and [`binary_dilation_no_merge`] perturb a
//! mask, by deleting a random subset of its objects or by growing every
//! object without letting neighbors fuse, for robustness experiments.

use crate::conncomp::{ConnectivityType, label_connected_components};
use crate::distance::distance_map;
use crate::error::{RegionError, RegionResult};
use crate::label::get_component_sizes;
use glandgraph_core::{Pix, PixelDepth};
use rand::Rng;
use rand::seq::index;

/// Threshold separating dark and light gray levels
pub const MASK_THRESHOLD: u32 = 128;

/// Normalize an 8-bit mask to background 0 and glands 255
///
/// A mask with more than two distinct values is treated as a gray
/// rendering with dark glands: values below [`MASK_THRESHOLD`] become 255
/// and the rest become 0. A two-valued mask is returned unchanged. If the
/// result does not have exactly two values a warning is logged, since
/// such masks usually indicate an annotation problem.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] unless the mask is 8 bpp.
pub fn correct_mask(mask: &Pix) -> RegionResult<Pix> {
    if mask.depth() != PixelDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bit",
            actual: mask.depth().bits(),
        });
    }

    let result = if mask.distinct_values().len() > 2 {
        let mut pm = mask.to_mut();
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                let v = mask.get_pixel_unchecked(x, y);
                pm.set_pixel_unchecked(x, y, if v < MASK_THRESHOLD { 255 } else { 0 });
            }
        }
        pm.into()
    } else {
        mask.clone()
    };

    let distinct = result.distinct_values();
    if distinct.len() != 2 {
        log::warn!(
            "mask {}x{} has {} distinct value(s) {:?} after correction",
            result.width(),
            result.height(),
            distinct.len(),
            distinct
        );
    }
    Ok(result)
}

/// Remove a random fraction of the objects in a mask
///
/// Objects are 8-connected components. `round(fraction * n)` of the `n`
/// objects, rounding halves to even, are chosen uniformly at random and
/// erased.
///
/// # Arguments
///
/// * `mask` - Input mask; nonzero pixels are foreground
/// * `fraction` - Fraction of objects to remove, in `[0, 1]`
/// * `rng` - Random source
///
/// # Returns
///
/// A 1 bpp mask with value 1 on the pixels of the surviving objects.
pub fn remove_objects<R: Rng + ?Sized>(
    mask: &Pix,
    fraction: f64,
    rng: &mut R,
) -> RegionResult<Pix> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(RegionError::InvalidParameters(format!(
            "fraction to remove must be in [0, 1], got {}",
            fraction
        )));
    }

    let labeled = label_connected_components(mask, ConnectivityType::EightWay)?;
    let mut n = 0usize;
    for y in 0..labeled.height() {
        for x in 0..labeled.width() {
            n = n.max(labeled.get_pixel_unchecked(x, y) as usize);
        }
    }
    let to_remove = (fraction * n as f64).round_ties_even() as usize;

    // keep[l] for label l; slot 0 is background
    let mut keep = vec![true; n + 1];
    keep[0] = false;
    for i in index::sample(rng, n, to_remove) {
        keep[i + 1] = false;
    }
    log::debug!("removing {} of {} objects", to_remove, n);

    let mut out = Pix::new(mask.width(), mask.height(), PixelDepth::Bit1)?.to_mut();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if keep[labeled.get_pixel_unchecked(x, y) as usize] {
                out.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(out.into())
}

/// Dilate every object of a mask without merging touching objects
///
/// Each pixel within Euclidean distance `iterations` of the foreground
/// joins the object of its nearest foreground pixel. Pixels where the
/// owning object changes between neighbors stay background, so grown
/// objects remain separated by a thin line. Background regions enclosed
/// by the result are filled; only the largest background region is kept.
///
/// # Arguments
///
/// * `mask` - Input mask; nonzero pixels are foreground
/// * `iterations` - Dilation radius in pixels
///
/// # Returns
///
/// An 8 bpp mask with glands 255 and background 0.
pub fn binary_dilation_no_merge(mask: &Pix, iterations: u32) -> RegionResult<Pix> {
    let (w, h) = (mask.width(), mask.height());
    let labeled = label_connected_components(mask, ConnectivityType::EightWay)?;
    let dm = distance_map(mask)?;
    let r2 = iterations as f64 * iterations as f64;

    // object owning each pixel, 0 where the mask is empty
    let mut owner = vec![0u32; w as usize * h as usize];
    for y in 0..h {
        for x in 0..w {
            if let Some((nx, ny)) = dm.nearest(x, y) {
                owner[y as usize * w as usize + x as usize] = labeled.get_pixel_unchecked(nx, ny);
            }
        }
    }
    let at = |x: u32, y: u32| owner[y as usize * w as usize + x as usize];
    let changes = |x: u32, y: u32| {
        let horizontal = w > 1 && {
            let (a, b) = (x.saturating_sub(1), (x + 1).min(w - 1));
            at(a, y) != at(b, y)
        };
        let vertical = h > 1 && {
            let (a, b) = (y.saturating_sub(1), (y + 1).min(h - 1));
            at(x, a) != at(x, b)
        };
        horizontal || vertical
    };

    // complement of the separated dilation
    let mut outside = Pix::new(w, h, PixelDepth::Bit1)?.to_mut();
    for y in 0..h {
        for x in 0..w {
            let grown = dm.distance2(x, y).is_some_and(|d| d <= r2);
            if !grown || changes(x, y) {
                outside.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    let outside: Pix = outside.into();
    let regions = label_connected_components(&outside, ConnectivityType::EightWay)?;
    let sizes = get_component_sizes(&regions)?;
    let background = sizes
        .iter()
        .enumerate()
        .max_by_key(|&(i, &size)| (size, std::cmp::Reverse(i)))
        .map(|(i, _)| i as u32 + 1);

    let mut out = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
    for y in 0..h {
        for x in 0..w {
            if Some(regions.get_pixel_unchecked(x, y)) != background {
                out.set_pixel_unchecked(x, y, 255);
            }
        }
    }
    log::debug!(
        "dilated {}x{} mask by {} without merging ({} background regions)",
        w,
        h,
        iterations,
        sizes.len()
    );
    Ok(out.into())
}
