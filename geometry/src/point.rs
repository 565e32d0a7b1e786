use std::ops::{Add, Sub};

use crate::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self { Self { x, y } }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Self::Output {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn point_difference_is_a_vector() {
        let v = Point::new(3.0, 5.0) - Point::new(1.0, 1.0);
        assert_float_eq!(v.x, 2.0, ulps <= 1);
        assert_float_eq!(v.y, 4.0, ulps <= 1);
    }

    #[test]
    fn point_plus_vector_translates() {
        let p = Point::new(1.0, 2.0) + Vector::new(0.5, -2.0);
        assert_float_eq!(p.x, 1.5, ulps <= 1);
        assert_float_eq!(p.y, 0.0, ulps <= 1);
    }
}
