//! Reconstruction state: current values, ground truth, and the scratch row.

use itertools::iproduct;

use crate::arena::Arena;
use crate::error::{ReconError, Result};
use crate::grid::{index2_to_1, Grid};
use crate::raster::Raster;
use crate::{Intensityf32, Weightf32};

/// The reconstruction grid: three arena-backed parallel fields per cell.
/// `values` and `ground_truth` are nominally in [0,1] (not clamped); `row`
/// holds the current ray's system-matrix weights only and is fully
/// overwritten at the start of each row build.
pub struct ReconGrid<'a> {
    pub grid: Grid,
    pub values: &'a mut [Intensityf32],
    pub ground_truth: &'a mut [Intensityf32],
    pub(crate) row: &'a mut [Weightf32],
}

impl<'a> ReconGrid<'a> {

    pub fn new(arena: &'a Arena, img_w: usize, img_h: usize, cell_size: usize) -> Result<Self> {
        let grid = Grid::new(img_w, img_h, cell_size)?;
        let n = grid.n();
        Ok(Self {
            grid,
            values: arena.alloc_slice(n, 0.0),
            ground_truth: arena.alloc_slice(n, 0.0),
            row: arena.alloc_slice(n, 0.0),
        })
    }

    /// Box-filter downsample of the source raster into per-cell averages in
    /// [0,1]. Partial cells at the raster's edges average over however many
    /// samples fall inside.
    pub fn build_ground_truth(&mut self, raster: &Raster) -> Result<()> {
        let Grid { nx, ny, cell_size, img_w, img_h } = self.grid;
        if raster.width != img_w || raster.height != img_h {
            return Err(ReconError::RasterGridMismatch {
                raster_w: raster.width,
                raster_h: raster.height,
                img_w,
                img_h,
            });
        }

        for (iy, ix) in iproduct!(0..ny, 0..nx) {
            let mut sum = 0.0;
            let mut count = 0;
            for (yy, xx) in iproduct!(0..cell_size, 0..cell_size) {
                let px = ix * cell_size + xx;
                let py = iy * cell_size + yy;
                if px < img_w && py < img_h {
                    sum += raster.get(px, py) as f32;
                    count += 1;
                }
            }
            self.ground_truth[index2_to_1([ix, iy], [nx, ny])] = sum / count as f32 / 255.0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn values_start_at_zero() {
        let arena = Arena::new();
        let grid = ReconGrid::new(&arena, 10, 10, 5).unwrap();
        assert_eq!(grid.grid.n(), 4);
        assert!(grid.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn ground_truth_is_a_box_average() {
        let arena = Arena::new();
        let mut grid = ReconGrid::new(&arena, 4, 4, 2).unwrap();
        let raster = Raster::new(4, 4, vec![
              0, 255,   0,   0,
            255,   0,   0,   0,
            255, 255, 255, 255,
            255, 255, 255, 255,
        ]).unwrap();

        grid.build_ground_truth(&raster).unwrap();

        assert_float_eq!(grid.ground_truth[0], 0.5, abs <= 1e-6); // two of four bright
        assert_float_eq!(grid.ground_truth[1], 0.0, abs <= 1e-6);
        assert_float_eq!(grid.ground_truth[2], 1.0, abs <= 1e-6);
        assert_float_eq!(grid.ground_truth[3], 1.0, abs <= 1e-6);
    }

    #[test]
    fn partial_edge_cells_average_their_own_samples() {
        let arena = Arena::new();
        let mut grid = ReconGrid::new(&arena, 3, 3, 2).unwrap(); // 2x2 cells, edge cells 1 pixel thin
        let raster = Raster::new(3, 3, vec![
            10, 20, 30,
            40, 50, 60,
            70, 80, 90,
        ]).unwrap();

        grid.build_ground_truth(&raster).unwrap();

        assert_float_eq!(grid.ground_truth[0], 30.0 / 255.0, abs <= 1e-6); // 10,20,40,50
        assert_float_eq!(grid.ground_truth[1], 45.0 / 255.0, abs <= 1e-6); // 30,60
        assert_float_eq!(grid.ground_truth[2], 75.0 / 255.0, abs <= 1e-6); // 70,80
        assert_float_eq!(grid.ground_truth[3], 90.0 / 255.0, abs <= 1e-6); // 90
    }

    #[test]
    fn raster_must_match_grid_dimensions() {
        let arena = Arena::new();
        let mut grid = ReconGrid::new(&arena, 4, 4, 2).unwrap();
        let raster = Raster::new(5, 4, vec![0; 20]).unwrap();
        assert!(matches!(grid.build_ground_truth(&raster),
                         Err(ReconError::RasterGridMismatch { .. })));
    }
}
