mod exports;
pub use exports::*;

pub mod arena;
pub mod rays;
pub mod grid;
pub mod recon;
pub mod kaczmarz;
pub mod fom;
pub mod raster;
pub mod phantom;
pub mod io;
pub mod config;
pub mod utils;
pub mod error;
