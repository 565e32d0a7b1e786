use crate::Point;

/// An axis-aligned rectangle; in the reconstruction this is one grid cell's
/// bounds in the current coordinate frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl Rect {

    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    pub fn width (&self) -> f32 { self.xmax - self.xmin }
    pub fn height(&self) -> f32 { self.ymax - self.ymin }

    pub fn centre(&self) -> Point {
        Point::new((self.xmin + self.xmax) / 2.0,
                   (self.ymin + self.ymax) / 2.0)
    }
}
