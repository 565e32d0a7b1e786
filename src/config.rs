//! Configuration file parser for the reconstruction CLI

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::phantom::PhantomKind;
use crate::rays::GeometryMode;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// P5 PGM image to reconstruct; a synthetic phantom is used when absent
    #[serde(default)]
    pub input: Option<PathBuf>,

    #[serde(default)]
    pub phantom: PhantomKind,

    #[serde(default = "default_phantom_size")]
    pub phantom_size: (usize, usize),

    /// Pixels per reconstruction cell
    #[serde(default = "default_cell_size")]
    pub cell_size: usize,

    #[serde(default = "default_num_sources")]
    pub num_sources: usize,

    #[serde(default = "default_rays_per_source")]
    pub rays_per_source: usize,

    /// Angular spread of each source's fan, in degrees
    #[serde(default = "default_spread_deg")]
    pub spread_deg: f32,

    /// Number of full sweeps over all sources
    #[serde(default = "default_sweeps")]
    pub sweeps: usize,

    #[serde(default)]
    pub geometry: GeometryMode,

    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

fn default_phantom_size()    -> (usize, usize) { (128, 128) }
fn default_cell_size()       -> usize          { 5 }
fn default_num_sources()     -> usize          { 360 }
fn default_rays_per_source() -> usize          { 30 }
fn default_spread_deg()      -> f32            { 30.0 }
fn default_sweeps()          -> usize          { 4 }
fn default_out_dir()         -> PathBuf        { "data/out/art".into() }

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            phantom: PhantomKind::default(),
            phantom_size: default_phantom_size(),
            cell_size: default_cell_size(),
            num_sources: default_num_sources(),
            rays_per_source: default_rays_per_source(),
            spread_deg: default_spread_deg(),
            sweeps: default_sweeps(),
            geometry: GeometryMode::default(),
            out_dir: default_out_dir(),
        }
    }
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let config = fs::read_to_string(path)?;
    Ok(toml::from_str(&config)?)
}
