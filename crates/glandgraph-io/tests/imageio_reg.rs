//! Image I/O regression test
//!
//! Masks and colored images must survive a write/read cycle through
//! every supported format, both in memory and through the filesystem.

use glandgraph_core::{Pix, PixelDepth};
use glandgraph_io::{ImageFormat, read_image, read_image_mem, write_image, write_image_mem};
use glandgraph_test::RegParams;

fn gland_mask() -> Pix {
    Pix::from_rows(&[
        &[0, 0, 0, 0, 0, 0, 0],
        &[0, 255, 255, 0, 0, 0, 0],
        &[0, 255, 255, 0, 0, 255, 0],
        &[0, 0, 0, 0, 255, 255, 0],
        &[0, 0, 0, 0, 0, 0, 0],
    ])
    .expect("mask")
}

fn colored() -> Pix {
    let mut pm = Pix::new(4, 3, PixelDepth::Bit32).expect("pix").to_mut();
    for y in 0..3 {
        for x in 0..4 {
            pm.set_rgb(x, y, (x * 60) as u8, (y * 100) as u8, 7)
                .expect("set");
        }
    }
    pm.into()
}

fn binary_mask() -> Pix {
    let mask = gland_mask();
    let mut pm = Pix::new(mask.width(), mask.height(), PixelDepth::Bit1)
        .expect("pix")
        .to_mut();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get_pixel_unchecked(x, y) != 0 {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    pm.into()
}

#[test]
fn imageio_reg() {
    let mut rp = RegParams::new("imageio");

    let images = [binary_mask(), gland_mask(), colored()];

    eprintln!("=== In-memory roundtrip ===");
    for format in [ImageFormat::Png, ImageFormat::Pnm] {
        for pix in &images {
            let bytes = write_image_mem(pix, format).expect("encode");
            let back = read_image_mem(&bytes).expect("decode");
            rp.compare_pix(pix, &back);
        }
    }

    eprintln!("=== File roundtrip ===");
    let dir = std::env::temp_dir();
    for (i, format) in [ImageFormat::Png, ImageFormat::Pnm].into_iter().enumerate() {
        let path = dir.join(format!("glandgraph_imageio_{}.{}", i, format.extension()));
        write_image(&images[1], &path, format).expect("write");
        let back = read_image(&path).expect("read");
        rp.compare_pix(&images[1], &back);
        rp.compare_values(7.0, back.count_foreground() as f64, 0.0);
        let _ = std::fs::remove_file(&path);
    }

    eprintln!("=== Unknown data ===");
    let garbage = read_image_mem(b"not an image");
    rp.compare_values(1.0, if garbage.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "imageio regression test failed");
}
