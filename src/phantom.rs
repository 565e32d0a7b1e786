//! Deterministic synthetic test rasters: one bright feature on a dark
//! background. Used by the CLI when no input image is given, and by tests.

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::Result;
use crate::raster::Raster;

const BACKGROUND: u8 = 20;
const FEATURE: u8 = 230;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PhantomKind {
    #[default]
    Square,
    Disc,
}

impl PhantomKind {

    pub fn generate(self, width: usize, height: usize) -> Result<Raster> {
        let mut data = vec![BACKGROUND; width * height];
        match self {
            PhantomKind::Square => {
                // Central square covering the middle third in each dimension
                for y in height / 3 .. 2 * height / 3 {
                    for x in width / 3 .. 2 * width / 3 {
                        data[y * width + x] = FEATURE;
                    }
                }
            }
            PhantomKind::Disc => {
                let cx = width  as f32 / 2.0;
                let cy = height as f32 / 2.0;
                let r = width.min(height) as f32 / 3.0;
                for y in 0..height {
                    for x in 0..width {
                        let dx = x as f32 + 0.5 - cx;
                        let dy = y as f32 + 0.5 - cy;
                        if dx*dx + dy*dy <= r*r {
                            data[y * width + x] = FEATURE;
                        }
                    }
                }
            }
        }
        Raster::new(width, height, data)
    }
}
