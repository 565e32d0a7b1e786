use std::ops::{Mul, Neg};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {

    pub fn new(x: f32, y: f32) -> Self { Self { x, y } }

    pub fn norm(self) -> f32 {
        let Self { x, y } = self;
        (x*x + y*y).sqrt()
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl Mul<f32> for Vector {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Vector { x: -self.x, y: -self.y }
    }
}
