//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4 binary), PGM (P5 binary), and PPM (P6
//! binary). ASCII variants are not supported.
//!
//! A set PBM bit is read as pixel value 1 and a nonzero 1 bpp pixel is
//! written as a set bit, so foreground stays foreground in both
//! directions.

use crate::{IoError, IoResult};
use glandgraph_core::{Pix, PixelDepth, color};
use std::io::{BufRead, Read, Write};

/// Parsed PNM header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PnmHeader {
    kind: u8,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Read one byte, or `None` at end of stream.
fn next_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let mut b = [0u8; 1];
    match reader.read(&mut b)? {
        0 => Ok(None),
        _ => Ok(Some(b[0])),
    }
}

/// Read an ASCII decimal header field, skipping whitespace and comments.
///
/// Consumes exactly one whitespace byte after the number.
fn read_header_int<R: BufRead>(reader: &mut R) -> IoResult<u32> {
    let mut c = loop {
        match next_byte(reader)? {
            None => return Err(IoError::InvalidData("truncated PNM header".to_string())),
            Some(b'#') => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            Some(b) if b.is_ascii_whitespace() => {}
            Some(b) => break b,
        }
    };

    let mut value: u32 = 0;
    loop {
        if !c.is_ascii_digit() {
            return Err(IoError::InvalidData(format!(
                "unexpected byte 0x{:02x} in PNM header",
                c
            )));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add((c - b'0') as u32))
            .ok_or_else(|| IoError::InvalidData("PNM header value overflow".to_string()))?;
        match next_byte(reader)? {
            Some(b) if b.is_ascii_whitespace() => return Ok(value),
            Some(b) => c = b,
            None => return Ok(value),
        }
    }
}

fn read_header<R: BufRead>(reader: &mut R) -> IoResult<PnmHeader> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic)?;
    let kind = match &magic {
        b"P4" => 4,
        b"P5" => 5,
        b"P6" => 6,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM magic {:?}",
                String::from_utf8_lossy(&magic)
            )));
        }
    };
    let width = read_header_int(reader)?;
    let height = read_header_int(reader)?;
    let maxval = if kind == 4 { 1 } else { read_header_int(reader)? };
    if maxval == 0 || maxval > 0xffff {
        return Err(IoError::InvalidData(format!("PNM maxval {}", maxval)));
    }
    Ok(PnmHeader {
        kind,
        width,
        height,
        maxval,
    })
}

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the `P4`/`P5`/`P6` magic
///
/// # Returns
/// A `Pix` at 1 bpp (PBM), 8 or 16 bpp (PGM), or 32 bpp (PPM).
///
/// Gray samples are stored as read, so label values survive a round
/// trip. Color samples wider than a byte are scaled by `255 / maxval` to
/// fit the 8-bit channels of a 32 bpp pixel.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let header = read_header(&mut reader)?;
    let PnmHeader {
        kind,
        width,
        height,
        maxval,
    } = header;
    let wide = maxval > 255;
    let sample_bytes = if wide { 2 } else { 1 };

    let (depth, row_bytes) = match kind {
        4 => (PixelDepth::Bit1, width.div_ceil(8) as usize),
        5 if wide => (PixelDepth::Bit16, width as usize * 2),
        5 => (PixelDepth::Bit8, width as usize),
        _ => (PixelDepth::Bit32, width as usize * 3 * sample_bytes),
    };
    let mut pm = Pix::new(width, height, depth)?.to_mut();

    // 8-bit channel value of a PPM sample
    let sample = |row: &[u8], i: usize| -> u32 {
        if wide {
            ((row[2 * i] as u32) << 8 | row[2 * i + 1] as u32) * 255 / maxval
        } else {
            row[i] as u32
        }
    };

    let mut row = vec![0u8; row_bytes];
    for y in 0..height {
        reader
            .read_exact(&mut row)
            .map_err(|_| IoError::InvalidData(format!("PNM raster truncated at row {}", y)))?;
        for x in 0..width {
            let xi = x as usize;
            let val = match kind {
                4 => ((row[xi / 8] >> (7 - (x % 8))) & 1) as u32,
                5 if wide => (row[2 * xi] as u32) << 8 | row[2 * xi + 1] as u32,
                5 => row[xi] as u32,
                _ => color::compose_rgb(
                    sample(&row, 3 * xi) as u8,
                    sample(&row, 3 * xi + 1) as u8,
                    sample(&row, 3 * xi + 2) as u8,
                ),
            };
            pm.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pm.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (1 bpp), P5 (8 or 16 bpp grayscale), or P6 (32 bpp RGB)
/// based on the pixel depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let (w, h) = (pix.width(), pix.height());
    match pix.depth() {
        PixelDepth::Bit1 => write!(writer, "P4\n{} {}\n", w, h)?,
        PixelDepth::Bit8 => write!(writer, "P5\n{} {}\n255\n", w, h)?,
        PixelDepth::Bit16 => write!(writer, "P5\n{} {}\n65535\n", w, h)?,
        PixelDepth::Bit32 => write!(writer, "P6\n{} {}\n255\n", w, h)?,
    }

    let mut row = Vec::with_capacity(w as usize * 3);
    for y in 0..h {
        row.clear();
        match pix.depth() {
            PixelDepth::Bit1 => {
                row.resize(w.div_ceil(8) as usize, 0);
                for x in 0..w {
                    if pix.get_pixel_unchecked(x, y) != 0 {
                        row[(x / 8) as usize] |= 0x80 >> (x % 8);
                    }
                }
            }
            PixelDepth::Bit8 => {
                row.extend((0..w).map(|x| pix.get_pixel_unchecked(x, y) as u8));
            }
            PixelDepth::Bit16 => {
                for x in 0..w {
                    let v = pix.get_pixel_unchecked(x, y);
                    row.extend_from_slice(&[(v >> 8) as u8, v as u8]);
                }
            }
            PixelDepth::Bit32 => {
                for x in 0..w {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    row.extend_from_slice(&[r, g, b]);
                }
            }
        }
        writer.write_all(&row)?;
    }
    writer.flush()?;
    Ok(())
}
