use itertools::iproduct;

use crate::error::{ReconError, Result};
use crate::grid::index2_to_1;
use crate::recon::ReconGrid;

/// A single-channel raster of 0-255 intensity samples: the core's only input.
/// Construction validates the dimensions, so the reconstruction never sees a
/// malformed buffer.
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Raster {

    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ReconError::EmptyRaster { width, height });
        }
        if data.len() != width * height {
            return Err(ReconError::RasterSizeMismatch { width, height, len: data.len() });
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Nearest upsampling of the grid's current values back to pixel
    /// resolution, rescaled from [0,1] to 0-255 (clamped, since the values are
    /// not).
    pub fn from_grid_values(grid: &ReconGrid) -> Self {
        let g = grid.grid;
        let mut data = vec![0_u8; g.img_w * g.img_h];
        for (iy, ix) in iproduct!(0..g.ny, 0..g.nx) {
            let value = grid.values[index2_to_1([ix, iy], [g.nx, g.ny])];
            let v = (value * 255.0).clamp(0.0, 255.0) as u8;
            for (yy, xx) in iproduct!(0..g.cell_size, 0..g.cell_size) {
                let px = ix * g.cell_size + xx;
                let py = iy * g.cell_size + yy;
                if px < g.img_w && py < g.img_h {
                    data[py * g.img_w + px] = v;
                }
            }
        }
        Self { width: g.img_w, height: g.img_h, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn valid_raster() {
        let raster = Raster::new(3, 2, vec![0, 50, 100, 150, 200, 250]).unwrap();
        assert_eq!(raster.get(0, 0),   0);
        assert_eq!(raster.get(2, 0), 100);
        assert_eq!(raster.get(1, 1), 200);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(Raster::new(0, 2, vec![]),
                         Err(ReconError::EmptyRaster { .. })));
        assert!(matches!(Raster::new(2, 0, vec![]),
                         Err(ReconError::EmptyRaster { .. })));
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(matches!(Raster::new(2, 2, vec![0; 3]),
                         Err(ReconError::RasterSizeMismatch { len: 3, .. })));
    }

    #[test]
    fn grid_values_upsample_to_pixels() {
        let arena = Arena::new();
        let grid = ReconGrid::new(&arena, 4, 4, 2).unwrap(); // 2x2 cells
        grid.values.copy_from_slice(&[0.0, 0.5, 1.0, 2.0]);

        let raster = Raster::from_grid_values(&grid);
        assert_eq!((raster.width, raster.height), (4, 4));
        assert_eq!(raster.get(0, 0),   0); // cell (0,0)
        assert_eq!(raster.get(3, 0), 127); // cell (1,0)
        assert_eq!(raster.get(0, 3), 255); // cell (0,1)
        assert_eq!(raster.get(3, 3), 255); // cell (1,1): clamped
    }
}
