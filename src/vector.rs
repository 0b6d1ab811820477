use std::ops::{Add, Mul, Sub};

/// 2D point or displacement in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scale(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(self, other: Vector) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f32) -> Vector {
        self.scale(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Vector::new(3.0, 4.0);
        let b = Vector::new(1.0, -2.0);
        assert_eq!(a + b, Vector::new(4.0, 2.0));
        assert_eq!(a - b, Vector::new(2.0, 6.0));
        assert_eq!(a * 2.0, Vector::new(6.0, 8.0));
        assert_eq!(a.scale(0.5), Vector::new(1.5, 2.0));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Vector::ZERO.distance_to(Vector::new(3.0, 4.0)), 5.0);
        assert_eq!(Vector::new(2.0, 2.0).distance_to(Vector::new(2.0, 2.0)), 0.0);
    }

    #[test]
    fn test_is_zero() {
        assert!(Vector::ZERO.is_zero());
        assert!(Vector::new(-0.0, 0.0).is_zero());
        assert!(!Vector::new(0.0, 1.0).is_zero());
    }
}
