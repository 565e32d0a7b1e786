//! End-to-end reconstruction: run the full pipeline on a synthetic phantom
//! and check that the iteration actually converges towards the ground truth.

use tomart::arena::Arena;
use tomart::kaczmarz::precompute_projections;
use tomart::phantom::PhantomKind;
use tomart::rays::RaySet;
use tomart::recon::ReconGrid;
use tomart::{Rect, Result};

fn reconstruct(sweeps: usize) -> Result<(f32, Vec<f32>)> {
    let arena = Arena::new();
    let raster = PhantomKind::Square.generate(64, 64)?;

    let mut rays = RaySet::generate_fan(&arena, 16, 9, 45.0)?;
    rays.retarget_to_rect(&Rect::new(0.0, 0.0, 64.0, 64.0))?;

    let mut grid = ReconGrid::new(&arena, 64, 64, 8)?;
    grid.build_ground_truth(&raster)?;
    precompute_projections(&mut grid, &mut rays);

    let mut sse_history = vec![grid.sum_squared_error()];
    for _ in 0..sweeps {
        grid.sweep(&rays)?;
        sse_history.push(grid.sum_squared_error());
    }
    Ok((grid.max_abs_error(), sse_history))
}

#[test]
fn error_decreases_over_sweeps() -> Result<()> {
    let (_, sse) = reconstruct(4)?;

    // Starting from zeros, the first sweep must make clear progress
    assert!(sse[1] < sse[0],
            "first sweep did not reduce the error: {} -> {}", sse[0], sse[1]);

    // Later sweeps may fluctuate slightly but must not undo the progress
    let last = *sse.last().unwrap();
    assert!(last < 0.5 * sse[0],
            "four sweeps retained too much error: {} -> {}", sse[0], last);
    Ok(())
}

#[test]
fn reconstruction_approaches_the_phantom() -> Result<()> {
    let (max_abs, _) = reconstruct(8)?;

    // Values live in [0,1]; a coarse fan-beam setup comfortably gets every
    // cell within half of that range after a few sweeps.
    assert!(max_abs < 0.5, "worst cell is {max_abs} away from the truth");
    Ok(())
}

#[test]
fn runs_are_deterministic() -> Result<()> {
    let (_, a) = reconstruct(2)?;
    let (_, b) = reconstruct(2)?;
    assert_eq!(a, b);
    Ok(())
}
