//! Colorize regression test
//!
//! Paints glands of a small mask from explicit colors, scalar values and
//! outcome categories, and checks that bad option combinations leave
//! nothing painted.
//!
//! Run with:
//! ```text
//! cargo test -p glandgraph-color --test colorize_reg
//! ```

use glandgraph_color::{
    ColorError, ColorScale, ColorizeOptions, OutcomeColor, colorize, colorize_outcomes,
};
use glandgraph_core::Pix;
use glandgraph_io::ImageFormat;
use glandgraph_region::{ConnectivityType, find_connected_components};
use glandgraph_test::RegParams;

fn glands() -> Pix {
    Pix::from_rows(&[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 255, 255, 0, 0, 0, 0, 0],
        &[0, 255, 255, 0, 0, 255, 255, 0],
        &[0, 0, 0, 0, 0, 255, 255, 0],
        &[0, 0, 0, 0, 0, 0, 255, 0],
        &[255, 0, 0, 0, 0, 0, 0, 0],
    ])
    .expect("glands")
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn painted(image: &Pix) -> usize {
    let mut n = 0;
    for y in 0..image.height() {
        for x in 0..image.width() {
            if image.get_rgb(x, y) != Some((0, 0, 0)) {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn colorize_reg() {
    let mut rp = RegParams::new("colorize");
    let mask = glands();
    let seeds = [(2, 2), (6, 4), (0, 5)];

    eprintln!("=== Explicit colors ===");
    let opts = ColorizeOptions::new().with_colors(vec![(255, 0, 0), (0, 255, 0), (0, 0, 255)]);
    let out = colorize(&mask, &seeds, &opts).expect("colorize");
    rp.compare_values(1.0, flag(out.is_complete()), 0.0);
    rp.compare_values(mask.count_foreground() as f64, painted(&out.image) as f64, 0.0);
    rp.compare_values(1.0, flag(out.image.get_rgb(1, 1) == Some((255, 0, 0))), 0.0);
    rp.compare_values(1.0, flag(out.image.get_rgb(5, 2) == Some((0, 255, 0))), 0.0);
    rp.compare_values(1.0, flag(out.image.get_rgb(0, 5) == Some((0, 0, 255))), 0.0);
    rp.write_pix(&out.image, ImageFormat::Png).expect("write");

    eprintln!("=== Values through viridis ===");
    let opts = ColorizeOptions::new().with_values(vec![0.0, 5.0, 10.0]);
    let out = colorize(&mask, &seeds, &opts).expect("colorize");
    let viridis = ColorScale::Viridis;
    rp.compare_values(1.0, flag(out.image.get_rgb(2, 1) == Some(viridis.sample(0.0))), 0.0);
    rp.compare_values(1.0, flag(out.image.get_rgb(6, 3) == Some(viridis.sample(0.5))), 0.0);
    rp.compare_values(1.0, flag(out.image.get_rgb(0, 5) == Some(viridis.sample(1.0))), 0.0);
    rp.write_pix(&out.image, ImageFormat::Png).expect("write");

    eprintln!("=== Outcome colors ===");
    let out = colorize_outcomes(
        &mask,
        &seeds,
        &[
            OutcomeColor::TruePositive,
            OutcomeColor::FalseNegative,
            OutcomeColor::TrueNegative,
        ],
    )
    .expect("outcomes");
    rp.compare_values(1.0, flag(out.image.get_rgb(6, 2) == Some((171, 217, 233))), 0.0);

    eprintln!("=== Colors and values together ===");
    let both = ColorizeOptions::new()
        .with_colors(vec![(1, 2, 3); 3])
        .with_values(vec![1.0, 2.0, 3.0]);
    let res = colorize(&mask, &seeds, &both);
    rp.compare_values(1.0, flag(matches!(res, Err(ColorError::InvalidInput(_)))), 0.0);

    eprintln!("=== Custom scale ===");
    let res = ColorScale::custom(vec![]);
    rp.compare_values(1.0, flag(matches!(res, Err(ColorError::InvalidInput(_)))), 0.0);
    let two = ColorScale::custom(vec![(0, 0, 0), (200, 100, 0)]).expect("scale");
    let opts = ColorizeOptions::new()
        .with_values(vec![1.0, 2.0, 3.0])
        .with_scale(two);
    let out = colorize(&mask, &seeds, &opts).expect("colorize");
    rp.compare_values(1.0, flag(out.image.get_rgb(6, 3) == Some((100, 50, 0))), 0.0);

    eprintln!("=== Bad seed after good ones paints nothing ===");
    let opts = ColorizeOptions::new().with_colors(vec![(9, 9, 9); 3]);
    let res = colorize(&mask, &[(2, 2), (6, 4), (3, 3)], &opts);
    rp.compare_values(1.0, flag(matches!(res, Err(ColorError::Region(_)))), 0.0);

    // The mask is unchanged and still has its three glands
    let comps = find_connected_components(&mask, ConnectivityType::EightWay).expect("comps");
    rp.compare_values(3.0, comps.len() as f64, 0.0);

    assert!(rp.cleanup(), "colorize regression test failed");
}
