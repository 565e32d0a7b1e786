mod point;
mod vector;
mod rect;
mod clip;

pub use point::Point;
pub use vector::Vector;
pub use rect::Rect;
pub use clip::{ray_rect_clip, Clip};
