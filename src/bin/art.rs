//! Command-line driver for the algebraic (Kaczmarz) reconstruction.

use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use tomart::arena::Arena;
use tomart::config::{read_config_file, Config};
use tomart::io::{pgm, raw};
use tomart::kaczmarz::precompute_projections;
use tomart::phantom::PhantomKind;
use tomart::raster::Raster;
use tomart::rays::{GeometryMode, RaySet};
use tomart::recon::ReconGrid;
use tomart::utils::{group_digits, parse_pair, timing::Progress};
use tomart::{Rect, Result};

#[derive(Parser, Debug, Clone)]
#[command(name = "art", about = "Iterative tomographic reconstruction with the Kaczmarz method")]
pub struct Cli {

    /// TOML configuration file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// P5 PGM image to reconstruct; a synthetic phantom is used when absent
    #[arg(long)]
    input: Option<PathBuf>,

    /// Phantom shape used when no input image is given
    #[arg(long, value_enum)]
    phantom: Option<PhantomKind>,

    /// Phantom size, given as `WxH` or `W,H`
    #[arg(long, value_parser = parse_pair::<usize>)]
    phantom_size: Option<(usize, usize)>,

    /// Pixels per reconstruction cell
    #[arg(long)]
    cell_size: Option<usize>,

    /// Number of sources placed on the bounding circle
    #[arg(long)]
    num_sources: Option<usize>,

    /// Rays per source fan (forced odd)
    #[arg(long)]
    rays_per_source: Option<usize>,

    /// Angular spread of each source's fan, in degrees
    #[arg(long)]
    spread_deg: Option<f32>,

    /// Number of full sweeps over all sources
    #[arg(long)]
    sweeps: Option<usize>,

    #[arg(long, value_enum)]
    geometry: Option<GeometryMode>,

    /// Directory for reconstruction outputs
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

/// Precedence: flag beats file beats default
fn resolve(cli: Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None       => Config::default(),
    };
    if cli.input.is_some()              { config.input           = cli.input; }
    if let Some(v) = cli.phantom        { config.phantom         = v; }
    if let Some(v) = cli.phantom_size   { config.phantom_size    = v; }
    if let Some(v) = cli.cell_size      { config.cell_size       = v; }
    if let Some(v) = cli.num_sources    { config.num_sources     = v; }
    if let Some(v) = cli.rays_per_source{ config.rays_per_source = v; }
    if let Some(v) = cli.spread_deg     { config.spread_deg      = v; }
    if let Some(v) = cli.sweeps         { config.sweeps          = v; }
    if let Some(v) = cli.geometry       { config.geometry        = v; }
    if let Some(v) = cli.out_dir        { config.out_dir         = v; }
    Ok(config)
}

fn main() -> Result<()> {
    let config = resolve(Cli::parse())?;
    let mut progress = Progress::new();

    progress.start("Preparing input raster");
    let raster = match &config.input {
        Some(path) => pgm::read(path)?,
        None       => config.phantom.generate(config.phantom_size.0, config.phantom_size.1)?,
    };
    progress.done_with_message(&format!("{}x{}", raster.width, raster.height));

    let arena = Arena::new();

    progress.start("Generating rays");
    let mut rays = RaySet::generate(&arena,
                                    config.geometry,
                                    config.num_sources,
                                    config.rays_per_source,
                                    config.spread_deg)?;
    rays.retarget_to_rect(&Rect::new(0.0, 0.0, raster.width as f32, raster.height as f32))?;
    progress.done_with_message(&format!("{} rays", group_digits(rays.len())));

    progress.start("Building reconstruction grid");
    let mut grid = ReconGrid::new(&arena, raster.width, raster.height, config.cell_size)?;
    grid.build_ground_truth(&raster)?;
    progress.done_with_message(&format!("{} cells", group_digits(grid.grid.n())));

    progress.start("Precomputing forward projections");
    precompute_projections(&mut grid, &mut rays);
    progress.done();

    let num_sources = rays.fan()?.num_sources;
    let bar = ProgressBar::new((config.sweeps * num_sources) as u64)
        .with_style(ProgressStyle::with_template("{wide_bar} {pos}/{len} sources")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()));
    for sweep in 1..=config.sweeps {
        let sweep_timer = std::time::Instant::now();
        for source in 0..num_sources {
            grid.process_source(&rays, source)?;
            bar.inc(1);
        }
        bar.println(format!("sweep {sweep:3}: SSE = {:10.6}   max |error| = {:.6}   ({} ms)",
                            grid.sum_squared_error(),
                            grid.max_abs_error(),
                            group_digits(sweep_timer.elapsed().as_millis())));
    }
    bar.finish_and_clear();

    std::fs::create_dir_all(&config.out_dir)?;
    progress.start(&format!("Writing outputs to {}", config.out_dir.display()));
    pgm::write(&config.out_dir.join("recon.pgm"), &Raster::from_grid_values(&grid))?;
    pgm::write_error_ppm(&config.out_dir.join("error.ppm"), &grid)?;
    raw::write(grid.values.iter().copied(),    &config.out_dir.join("values.raw"))?;
    raw::write(grid.error_field().into_iter(), &config.out_dir.join("error.raw"))?;
    progress.done();

    println!("Arena: {} bytes in {} block(s)",
             group_digits(arena.allocated_bytes()),
             group_digits(arena.block_count()));
    Ok(())
}
