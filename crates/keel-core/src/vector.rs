use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2D vector in screen space (x right, y down).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// World "down", the direction gravity pulls in the default scene.
    pub const DOWN: Self = Self::new(0.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of two in-plane vectors.
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn magnitude_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector in the same direction. A zero vector stays zero.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            Self::ZERO
        } else {
            Self::new(self.x / mag, self.y / mag)
        }
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).magnitude()
    }

    /// Rotate by `angle` radians (positive turns +x toward +y).
    pub fn rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Velocity of a point at offset `r` on a body spinning at `omega` rad/s.
    pub fn spin_velocity(omega: f32, r: Self) -> Self {
        Self::new(-omega * r.y, omega * r.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn cross_is_z_component() {
        let x = Vector::new(1.0, 0.0);
        let y = Vector::new(0.0, 1.0);
        assert_eq!(x.cross(y), 1.0);
        assert_eq!(y.cross(x), -1.0);
        assert_eq!(x.cross(x), 0.0);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vector::ZERO.normalize(), Vector::ZERO);
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vector::new(3.0, 4.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < EPS);
        assert!((n.x - 0.6).abs() < EPS && (n.y - 0.8).abs() < EPS);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(4.0, 6.0);
        assert!((a.distance(b) - 5.0).abs() < EPS);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn rotate_quarter_turn_points_down() {
        let r = Vector::new(1.0, 0.0).rotate(std::f32::consts::FRAC_PI_2);
        assert!(r.x.abs() < EPS, "x = {}", r.x);
        assert!((r.y - 1.0).abs() < EPS, "y = {}", r.y);
    }

    #[test]
    fn spin_velocity_is_perpendicular() {
        let r = Vector::new(2.0, 1.0);
        let v = Vector::spin_velocity(3.0, r);
        assert_eq!(v, Vector::new(-3.0, 6.0));
        assert!(v.dot(r).abs() < EPS);
    }

    #[test]
    fn operators_compose() {
        let a = Vector::new(1.0, -2.0);
        let b = Vector::new(0.5, 4.0);
        assert_eq!(a + b - b, a);
        assert_eq!(a * 2.0, Vector::new(2.0, -4.0));
        assert_eq!(-a, Vector::new(-1.0, 2.0));
    }
}
