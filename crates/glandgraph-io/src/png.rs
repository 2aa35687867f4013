//! PNG image format support
//!
//! Grayscale PNGs keep their bit depth where `Pix` has a matching depth
//! (1, 8, 16). Color, gray+alpha and palette images are expanded to
//! 32 bpp RGB(A). Sub-byte gray (2 and 4 bit) is scaled up to 8 bpp.

use crate::{IoError, IoResult};
use glandgraph_core::{Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a sample of `bits` width at index `x` from a packed PNG row.
#[inline]
fn packed_sample(row: &[u8], x: u32, bits: u32) -> u8 {
    let per_byte = 8 / bits;
    let byte = row[(x / per_byte) as usize];
    let shift = 8 - bits * (x % per_byte + 1);
    (byte >> shift) & ((1u16 << bits) - 1) as u8
}

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette: Option<Vec<u8>> = info.palette.as_ref().map(|p| p.to_vec());

    let (pix_depth, spp) = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => (PixelDepth::Bit1, 1),
        (ColorType::Grayscale, BitDepth::Sixteen) => (PixelDepth::Bit16, 1),
        (ColorType::Grayscale, _) => (PixelDepth::Bit8, 1),
        (ColorType::GrayscaleAlpha, _) | (ColorType::Rgba, _) => (PixelDepth::Bit32, 4),
        (ColorType::Rgb, _) | (ColorType::Indexed, _) => (PixelDepth::Bit32, 3),
    };
    log::debug!(
        "reading PNG {}x{} {:?} {:?} -> {} bpp",
        width,
        height,
        color_type,
        bit_depth,
        pix_depth.bits()
    );

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();
    pix_mut.set_spp(spp);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let sixteen = bit_depth == BitDepth::Sixteen;

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let xi = x as usize;
            let val = match color_type {
                ColorType::Grayscale => match bit_depth {
                    BitDepth::One => packed_sample(row, x, 1) as u32,
                    BitDepth::Two => packed_sample(row, x, 2) as u32 * 0x55,
                    BitDepth::Four => packed_sample(row, x, 4) as u32 * 0x11,
                    BitDepth::Eight => row[xi] as u32,
                    BitDepth::Sixteen => ((row[2 * xi] as u32) << 8) | row[2 * xi + 1] as u32,
                },
                ColorType::Indexed => {
                    let index = match bit_depth {
                        BitDepth::Eight => row[xi] as usize,
                        bits => packed_sample(row, x, bits as u32) as usize,
                    };
                    let entry = palette
                        .as_deref()
                        .and_then(|p| p.get(3 * index..3 * index + 3))
                        .ok_or_else(|| {
                            IoError::InvalidData(format!("palette index {} out of range", index))
                        })?;
                    color::compose_rgb(entry[0], entry[1], entry[2])
                }
                ColorType::GrayscaleAlpha => {
                    let (g, a) = if sixteen {
                        (row[4 * xi], row[4 * xi + 2])
                    } else {
                        (row[2 * xi], row[2 * xi + 1])
                    };
                    color::compose_rgba(g, g, g, a)
                }
                ColorType::Rgb => {
                    let s = if sixteen { 6 * xi } else { 3 * xi };
                    let step = if sixteen { 2 } else { 1 };
                    color::compose_rgb(row[s], row[s + step], row[s + 2 * step])
                }
                ColorType::Rgba => {
                    let s = if sixteen { 8 * xi } else { 4 * xi };
                    let step = if sixteen { 2 } else { 1 };
                    color::compose_rgba(
                        row[s],
                        row[s + step],
                        row[s + 2 * step],
                        row[s + 3 * step],
                    )
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 1, 8 and 16 bpp images are written as grayscale; 32 bpp images as RGB,
/// or RGBA when the image carries 4 samples per pixel.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth, bytes_per_row) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One, width.div_ceil(8)),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight, width),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen, width * 2),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, BitDepth::Eight, width * 4),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight, width * 3),
    };
    let bytes_per_row = bytes_per_row as usize;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; bytes_per_row * height as usize];
    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let xi = x as usize;
            let val = pix.get_pixel_unchecked(x, y);
            match pix.depth() {
                PixelDepth::Bit1 => {
                    if val != 0 {
                        row[xi / 8] |= 0x80 >> (x % 8);
                    }
                }
                PixelDepth::Bit8 => row[xi] = val as u8,
                PixelDepth::Bit16 => {
                    row[2 * xi] = (val >> 8) as u8;
                    row[2 * xi + 1] = val as u8;
                }
                PixelDepth::Bit32 => {
                    let samples = if color_type == ColorType::Rgba { 4 } else { 3 };
                    let (r, g, b) = color::extract_rgb(val);
                    row[samples * xi] = r;
                    row[samples * xi + 1] = g;
                    row[samples * xi + 2] = b;
                    if samples == 4 {
                        row[samples * xi + 3] = color::alpha(val);
                    }
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(pix2.get_pixel(x, y), pix.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_png_roundtrip_binary() {
        let mut pix_mut = Pix::new(11, 3, PixelDepth::Bit1).unwrap().to_mut();
        pix_mut.set_pixel(0, 0, 1).unwrap();
        pix_mut.set_pixel(9, 1, 1).unwrap();
        pix_mut.set_pixel(10, 2, 1).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.depth(), PixelDepth::Bit1);
        assert_eq!(pix2.count_foreground(), 3);
        assert_eq!(pix2.get_pixel(9, 1), Some(1));
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = Pix::new(5, 5, PixelDepth::Bit32).unwrap().to_mut();
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
    }

    #[test]
    fn test_packed_sample() {
        let row = [0b1011_0001u8];
        assert_eq!(packed_sample(&row, 0, 1), 1);
        assert_eq!(packed_sample(&row, 1, 1), 0);
        assert_eq!(packed_sample(&row, 1, 2), 0b11);
        assert_eq!(packed_sample(&row, 1, 4), 0b0001);
    }
}
