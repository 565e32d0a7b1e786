pub use geometry::{ray_rect_clip, Clip, Point, Rect, Vector};

pub use crate::error::{ReconError, Result};

pub type Lengthf32    = f32;
pub type Weightf32    = f32;
pub type Intensityf32 = f32;

pub use crate::grid::{index1_to_2, index2_to_1};
