//! The size and granularity of the grid on which images are reconstructed

use crate::error::{ReconError, Result};
use crate::Rect;

/// Cell layout of the reconstruction grid: `cell_size` pixels per cell, with
/// edge cells simply covering fewer pixels when the image size is not a
/// multiple of the cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,
    pub cell_size: usize,
    pub img_w: usize,
    pub img_h: usize,
}

impl Grid {

    pub fn new(img_w: usize, img_h: usize, cell_size: usize) -> Result<Self> {
        if img_w == 0 || img_h == 0 || cell_size == 0 {
            return Err(ReconError::GridConfig { img_w, img_h, cell_size });
        }
        Ok(Self {
            nx: (img_w + cell_size - 1) / cell_size,
            ny: (img_h + cell_size - 1) / cell_size,
            cell_size,
            img_w,
            img_h,
        })
    }

    /// Total number of cells
    pub fn n(&self) -> usize { self.nx * self.ny }

    /// Bounds of the cell with the given 2D index, in image pixel coordinates
    pub fn cell_rect(&self, ix: usize, iy: usize) -> Rect {
        let s = self.cell_size as f32;
        Rect::new( ix      as f32 * s,  iy      as f32 * s,
                  (ix + 1) as f32 * s, (iy + 1) as f32 * s)
    }
}

// --------------------------------------------------------------------------------
//                  Conversion between 1d and 2d cell indices

use std::ops::{Add, Div, Mul, Rem};

pub fn index2_to_1<T>([ix, iy]: [T; 2], [nx, _ny]: [T; 2]) -> T
where
    T: Mul<Output = T> + Add<Output = T>
{
    ix + iy * nx
}

pub fn index1_to_2<T>(i: T, [nx, _ny]: [T; 2]) -> [T; 2]
where
    T: Div<Output = T> + Rem<Output = T> + Copy
{
    [i % nx, i / nx]
}

#[cfg(test)]
mod test_grid {
    use super::*;
    use float_eq::assert_float_eq;
    use rstest::rstest;

    #[rstest(/**/ img_w, img_h, cell, nx, ny,
             case(  10 ,   10 ,   5 ,  2,  2),
             case(  13 ,    7 ,   5 ,  3,  2), // edge cells are smaller
             case(   1 ,    1 ,   1 ,  1,  1),
             case( 256 ,  256 ,   5 , 52, 52),
    )]
    fn dimensions_round_up(img_w: usize, img_h: usize, cell: usize, nx: usize, ny: usize) {
        let grid = Grid::new(img_w, img_h, cell).unwrap();
        assert_eq!((grid.nx, grid.ny), (nx, ny));
    }

    #[rstest(/**/ img_w, img_h, cell,
             case(   0 ,   10 ,   5 ),
             case(  10 ,    0 ,   5 ),
             case(  10 ,   10 ,   0 ),
    )]
    fn degenerate_dimensions_are_rejected(img_w: usize, img_h: usize, cell: usize) {
        assert!(matches!(Grid::new(img_w, img_h, cell),
                         Err(ReconError::GridConfig { .. })));
    }

    #[test]
    fn cell_rect_in_pixel_coordinates() {
        let grid = Grid::new(20, 20, 5).unwrap();
        let r = grid.cell_rect(2, 1);
        assert_float_eq!(r.xmin, 10.0, ulps <= 1);
        assert_float_eq!(r.ymin,  5.0, ulps <= 1);
        assert_float_eq!(r.xmax, 15.0, ulps <= 1);
        assert_float_eq!(r.ymax, 10.0, ulps <= 1);
    }
}
