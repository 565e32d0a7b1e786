pub mod pgm;
pub mod raw;
