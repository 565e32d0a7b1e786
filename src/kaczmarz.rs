//! System-matrix row construction and the Kaczmarz update rule.

use itertools::iproduct;
use ndarray::{aview1, aview_mut1, azip};

#[cfg(not(feature = "serial"))]
use rayon::prelude::*;

use geometry::ray_rect_clip;

use crate::error::{ReconError, Result};
use crate::grid::{index2_to_1, Grid};
use crate::rays::{Ray, RaySet};
use crate::recon::ReconGrid;
use crate::Weightf32;

/// Rows with a smaller squared norm are skipped: such a ray barely grazes the
/// grid and the correction would divide by ~0. Tunable, not load-bearing.
pub const ROW_NORM_EPS: f32 = 1e-12;

/// Fill `row` with one ray's system-matrix weights: the ray's path length
/// through each cell, normalised by the cell size so that a clean full-cell
/// crossing weighs ~1 whatever the cell's pixel size.
///
/// A free function rather than a method so that projection-precompute workers
/// can run it on private row buffers.
pub fn update_system_matrix_row(row: &mut [Weightf32], grid: Grid, ray: &Ray) {
    row.fill(0.0);
    for (iy, ix) in iproduct!(0..grid.ny, 0..grid.nx) {
        let cell = grid.cell_rect(ix, iy);
        if let Some(clip) = ray_rect_clip(&cell, ray.origin, ray.dir) {
            row[index2_to_1([ix, iy], [grid.nx, grid.ny])] = clip.length / grid.cell_size as f32;
        }
    }
}

#[inline]
fn forward_project(weights: &[Weightf32], values: &[f32]) -> f32 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

impl ReconGrid<'_> {

    /// Rebuild the scratch row for `ray`
    pub fn build_row(&mut self, ray: &Ray) {
        update_system_matrix_row(self.row, self.grid, ray);
    }

    /// Simulated detector reading for `ray`: dot product of its row with the
    /// ground truth.
    pub fn forward_projection(&mut self, ray: &Ray) -> f32 {
        self.build_row(ray);
        forward_project(self.row, self.ground_truth)
    }

    /// Classical Kaczmarz step: orthogonally project the current value vector
    /// onto the hyperplane `row · x = projection`. Uses the scratch row as
    /// built by the most recent [`build_row`](Self::build_row).
    pub fn kaczmarz_step(&mut self, projection: f32) {
        let mut ax = 0.0;
        let mut norm_a = 0.0;
        for (&w, &v) in self.row.iter().zip(self.values.iter()) {
            ax += w * v;
            norm_a += w * w;
        }

        if norm_a < ROW_NORM_EPS { return; }

        let alpha = (projection - ax) / norm_a;
        azip!((v in aview_mut1(self.values), &w in aview1(self.row)) *v += alpha * w);
    }

    /// Build the row for one ray and apply its correction
    pub fn process_ray(&mut self, ray: &Ray, projection: f32) {
        self.build_row(ray);
        self.kaczmarz_step(projection);
    }

    /// Process one source's bundle of rays, in index order. The caller owns
    /// the round-robin across sources.
    pub fn process_source(&mut self, rays: &RaySet, source: usize) -> Result<()> {
        let fan = rays.fan()?;
        if source >= fan.num_sources {
            return Err(ReconError::SourceOutOfRange { index: source, num_sources: fan.num_sources });
        }
        let start = source * fan.rays_per_source;
        for i in start..start + fan.rays_per_source {
            self.process_ray(&rays.rays[i], rays.projections[i]);
        }
        Ok(())
    }

    /// One complete pass over every source in the set
    pub fn sweep(&mut self, rays: &RaySet) -> Result<()> {
        for source in 0..rays.fan()?.num_sources {
            self.process_source(rays, source)?;
        }
        Ok(())
    }
}

/// Compute the forward projection of the ground truth for every ray, storing
/// it in the set. Runs before any reconstruction iteration.
///
/// Each rayon worker owns a private row buffer and writes a disjoint output
/// slot, so the results are identical to the serial pass (which reuses the
/// grid's scratch row instead).
pub fn precompute_projections(grid: &mut ReconGrid, rays: &mut RaySet) {
    #[cfg(feature = "serial")]
    for (ray, projection) in rays.rays.iter().zip(rays.projections.iter_mut()) {
        *projection = grid.forward_projection(ray);
    }

    #[cfg(not(feature = "serial"))]
    {
        let g = grid.grid;
        let truth: &[f32] = &grid.ground_truth[..];
        let projections: Vec<f32> = rays.rays
            .par_iter()
            .map_init(|| vec![0.0; g.n()],
                      |row, ray| {
                          update_system_matrix_row(row, g, ray);
                          forward_project(row, truth)
                      })
            .collect();
        rays.projections.copy_from_slice(&projections);
    }
}
