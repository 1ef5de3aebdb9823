//! 2D vector value type used throughout the simulation
//!
//! `Vector2` is a plain `Copy` value: every operation returns a new vector and
//! leaves its operands untouched. The only mutating operation is [`Vector2::set`],
//! used on hot paths such as pointer tracking.
//!
//! The arithmetic is delegated to `glam::Vec2`, which the viewer also speaks.

use glam::Vec2;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D vector in screen space (x to the right, y downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Overwrite both components in place
    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn add(self, other: Self) -> Self {
        (self.as_glam() + other.as_glam()).into()
    }

    pub fn subtract(self, other: Self) -> Self {
        (self.as_glam() - other.as_glam()).into()
    }

    pub fn multiply(self, scalar: f32) -> Self {
        (self.as_glam() * scalar).into()
    }

    pub fn dot(self, other: Self) -> f32 {
        self.as_glam().dot(other.as_glam())
    }

    /// Scalar 2D cross product: `x1 * y2 - y1 * x2`
    pub fn cross(self, other: Self) -> f32 {
        self.as_glam().perp_dot(other.as_glam())
    }

    pub fn magnitude(self) -> f32 {
        self.as_glam().length()
    }

    pub fn magnitude_squared(self) -> f32 {
        self.as_glam().length_squared()
    }

    pub fn distance(self, other: Self) -> f32 {
        self.as_glam().distance(other.as_glam())
    }

    /// Unit vector in the same direction, or `None` for a zero (or non-finite)
    /// vector. Huge finite vectors whose length overflows still normalise.
    pub fn try_normalize(self) -> Option<Self> {
        let largest = self.x.abs().max(self.y.abs());
        if !(largest.is_finite() && largest > 0.0) {
            return None;
        }
        (self.as_glam() / largest).try_normalize().map(Self::from)
    }

    /// Unit vector in the same direction; the zero vector normalises to zero
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    /// Rescale to exactly `max` when the magnitude reaches it, keeping the
    /// direction. The result's magnitude never exceeds `max`.
    pub fn clamp_magnitude(self, max: f32) -> Self {
        if !(max.is_finite() && max >= 0.0) || self.magnitude() < max {
            return self;
        }
        let Some(unit) = self.try_normalize() else {
            return self;
        };
        let mut clamped = unit.multiply(max);
        // rounding can leave the rescaled vector a few ulps long
        let mut shrink = 1.0 - f32::EPSILON;
        while clamped.magnitude() > max {
            clamped = clamped.multiply(shrink);
            shrink *= shrink;
        }
        clamped
    }

    pub fn is_finite(self) -> bool {
        self.as_glam().is_finite()
    }

    pub fn as_glam(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        v.as_glam()
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vector2::add(self, rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = Vector2::add(*self, rhs);
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(rhs);
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.multiply(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        self.multiply(-1.0)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_do_not_mutate_operands() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -4.0);
        let sum = a.add(b);
        assert_eq!(sum, Vector2::new(4.0, -2.0));
        assert_eq!(a, Vector2::new(1.0, 2.0));
        assert_eq!(b, Vector2::new(3.0, -4.0));
        assert_eq!(a.subtract(b), Vector2::new(-2.0, 6.0));
        assert_eq!(a.multiply(2.0), Vector2::new(2.0, 4.0));
    }

    #[test]
    fn dot_and_cross() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(a.dot(b), 11.0);
        assert_eq!(a.cross(b), 1.0 * 4.0 - 2.0 * 3.0);
        assert_eq!(b.cross(a), -a.cross(b));
    }

    #[test]
    fn magnitude_of_3_4_is_5() {
        assert!((Vector2::new(3.0, 4.0).magnitude() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector_is_zero() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
        assert_eq!(Vector2::ZERO.try_normalize(), None);
    }

    #[test]
    fn normalize_survives_overflowing_length() {
        let n = Vector2::new(1e20, -1e20).normalize();
        assert!((n.x - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((n.y + std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert_eq!(Vector2::new(f32::INFINITY, 0.0).try_normalize(), None);
    }

    #[test]
    fn clamp_magnitude_never_exceeds_max() {
        let short = Vector2::new(3.0, 4.0);
        assert_eq!(short.clamp_magnitude(10.0), short);
        for (x, y) in [(30.0, 40.0), (-123.4, 0.7), (1e20, 0.0), (7.3e10, -2.9e30)] {
            let clamped = Vector2::new(x, y).clamp_magnitude(50.0);
            assert!(clamped.magnitude() <= 50.0, "({x}, {y}) -> {clamped}");
            assert!(clamped.magnitude() > 49.999);
        }
        assert_eq!(Vector2::new(1e20, 0.0).clamp_magnitude(50.0), Vector2::new(50.0, 0.0));
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vector2::new(-7.0, 24.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
        assert!((n.x + 0.28).abs() < 1e-6);
    }

    #[test]
    fn set_mutates_in_place() {
        let mut v = Vector2::new(1.0, 1.0);
        v.set(5.0, -5.0);
        assert_eq!(v, Vector2::new(5.0, -5.0));
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!Vector2::new(f32::NAN, 0.0).is_finite());
        assert!(Vector2::new(1.0, 0.0).is_finite());
    }
}
