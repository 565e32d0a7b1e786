use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    #[error("raster dimensions must be non-zero, got {width}x{height}")]
    EmptyRaster { width: usize, height: usize },

    #[error("raster buffer holds {len} samples, which does not match {width}x{height}")]
    RasterSizeMismatch { width: usize, height: usize, len: usize },

    #[error("raster is {raster_w}x{raster_h} but the grid was built for {img_w}x{img_h}")]
    RasterGridMismatch { raster_w: usize, raster_h: usize, img_w: usize, img_h: usize },

    #[error("invalid grid: image {img_w}x{img_h} with cell size {cell_size}")]
    GridConfig { img_w: usize, img_h: usize, cell_size: usize },

    #[error("a ray set needs at least one source")]
    NoSources,

    #[error("only fan-beam geometry is implemented")]
    UnsupportedGeometry,

    #[error("source index {index} out of range: the set has {num_sources} sources")]
    SourceOutOfRange { index: usize, num_sources: usize },

    #[error("not a valid PGM file: {0}")]
    PgmFormat(String),

    #[error("could not parse config file: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ReconError> = std::result::Result<T, E>;
