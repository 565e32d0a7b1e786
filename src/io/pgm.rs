//! Binary PGM (P5) reading and writing, plus the P6 signed-error rendering

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::iproduct;

use crate::error::{ReconError, Result};
use crate::fom::ERROR_DISPLAY_SCALE;
use crate::grid::index2_to_1;
use crate::raster::Raster;
use crate::recon::ReconGrid;

/// Read a binary P5 PGM with maxval <= 255. `#` comment lines in the header
/// are tolerated.
pub fn read(path: &Path) -> Result<Raster> {
    let bytes = fs::read(path)?;
    if bytes.len() < 2 || &bytes[..2] != b"P5" {
        return Err(ReconError::PgmFormat("missing P5 magic".into()));
    }

    let mut pos = 2;
    let width  = header_number(&bytes, &mut pos)?;
    let height = header_number(&bytes, &mut pos)?;
    let maxval = header_number(&bytes, &mut pos)?;
    if maxval == 0 || maxval > 255 {
        return Err(ReconError::PgmFormat(format!("unsupported maxval {maxval}")));
    }

    // Exactly one whitespace byte separates the header from the pixel data
    pos += 1;
    let need = width.checked_mul(height)
        .ok_or_else(|| ReconError::PgmFormat(format!("implausible image size {width}x{height}")))?;
    match pos.checked_add(need) {
        Some(end) if end <= bytes.len() => Raster::new(width, height, bytes[pos..end].to_vec()),
        _ => Err(ReconError::PgmFormat("truncated pixel data".into())),
    }
}

fn header_number(bytes: &[u8], pos: &mut usize) -> Result<usize> {
    loop {
        match bytes.get(*pos) {
            Some(b) if b.is_ascii_whitespace() => *pos += 1,
            Some(b'#') => while !matches!(bytes.get(*pos), None | Some(b'\n')) { *pos += 1 },
            _ => break,
        }
    }
    let start = *pos;
    while matches!(bytes.get(*pos), Some(b) if b.is_ascii_digit()) { *pos += 1 }
    std::str::from_utf8(&bytes[start..*pos]).ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ReconError::PgmFormat("malformed header".into()))
}

pub fn write(path: &Path, raster: &Raster) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P5\n{} {}\n255\n", raster.width, raster.height)?;
    out.write_all(&raster.data)?;
    Ok(())
}

/// Render the signed reconstruction error as a P6 PPM at pixel resolution:
/// red for over-reconstruction, blue for under.
pub fn write_error_ppm(path: &Path, grid: &ReconGrid) -> Result<()> {
    let g = grid.grid;
    let mut rgb = vec![0_u8; g.img_w * g.img_h * 3];

    for (iy, ix) in iproduct!(0..g.ny, 0..g.nx) {
        let i = index2_to_1([ix, iy], [g.nx, g.ny]);
        let scaled = (grid.values[i] - grid.ground_truth[i]) * ERROR_DISPLAY_SCALE;
        let (r, b) = if scaled > 0.0 { ( scaled.min(255.0) as u8, 0                      ) }
                     else            { ( 0                      , (-scaled).min(255.0) as u8) };

        for (yy, xx) in iproduct!(0..g.cell_size, 0..g.cell_size) {
            let px = ix * g.cell_size + xx;
            let py = iy * g.cell_size + yy;
            if px < g.img_w && py < g.img_h {
                let o = (py * g.img_w + px) * 3;
                rgb[o    ] = r;
                rgb[o + 2] = b;
            }
        }
    }

    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{} {}\n255\n", g.img_w, g.img_h)?;
    out.write_all(&rgb)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use tempfile::tempdir;

    #[test]
    fn pgm_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.pgm");

        let original = Raster::new(3, 2, vec![0, 60, 120, 180, 240, 255])?;
        write(&path, &original)?;
        let reloaded = read(&path)?;

        assert_eq!((reloaded.width, reloaded.height), (3, 2));
        assert_eq!(reloaded.data, original.data);
        Ok(())
    }

    #[test]
    fn header_comments_are_tolerated() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("commented.pgm");
        fs::write(&path, b"P5\n# made by hand\n2 2\n# maxval next\n255\n\x01\x02\x03\x04")?;

        let raster = read(&path)?;
        assert_eq!((raster.width, raster.height), (2, 2));
        assert_eq!(raster.data, vec![1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn bad_magic_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("not.pgm");
        fs::write(&path, b"P6\n2 2\n255\n----").unwrap();
        assert!(matches!(read(&path), Err(ReconError::PgmFormat(_))));
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.pgm");
        // Each dimension parses, but their product wraps usize
        fs::write(&path, format!("P5\n{} 3\n255\n", usize::MAX / 2)).unwrap();
        assert!(matches!(read(&path), Err(ReconError::PgmFormat(_))));
    }

    #[test]
    fn truncated_data_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.pgm");
        fs::write(&path, b"P5\n4 4\n255\n\x00\x01\x02").unwrap();
        assert!(matches!(read(&path), Err(ReconError::PgmFormat(_))));
    }

    #[test]
    fn error_image_marks_over_red_and_under_blue() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("error.ppm");

        let arena = Arena::new();
        let grid = ReconGrid::new(&arena, 2, 1, 1)?; // 2x1 cells, one pixel each
        grid.values.copy_from_slice(&[1.0, 0.0]);
        grid.ground_truth.copy_from_slice(&[0.0, 1.0]);
        write_error_ppm(&path, &grid)?;

        let bytes = fs::read(&path)?;
        let pixels = &bytes[bytes.len() - 6..];
        assert_eq!(pixels, [255, 0, 0, 0, 0, 255]);
        Ok(())
    }
}
