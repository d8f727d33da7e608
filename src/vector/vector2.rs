use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::{
    error::{check_shape, Result},
    COMPARE_EPSILON, EPSILON,
};

/// Two-component vector. Portable only; two lanes are not worth a dispatch hop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, -1.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_slice(components: &[f32]) -> Result<Self> {
        check_shape(2, components.len())?;
        Ok(Self::new(components[0], components[1]))
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Z component of the 3D cross product of the two vectors.
    #[inline]
    pub fn cross(self, rhs: Self) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }

    /// Unit-length copy, or zero for degenerate input.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Counter-clockwise perpendicular.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn min(self, rhs: Self) -> Self {
        Self::new(self.x.min(rhs.x), self.y.min(rhs.y))
    }

    pub fn max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y))
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        self + (to - self) * t
    }

    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * normal.dot(self))
    }

    /// Unsigned angle in radians.
    pub fn angle(self, to: Self) -> f32 {
        let denom = (self.length_squared() * to.length_squared()).sqrt();
        if denom < EPSILON {
            return 0.0;
        }
        (self.dot(to) / denom).clamp(-1.0, 1.0).acos()
    }

    pub fn clamp_magnitude(self, max_length: f32) -> Self {
        if self.length_squared() > max_length * max_length {
            self.normalized() * max_length
        } else {
            self
        }
    }

    pub fn move_towards(self, target: Self, max_delta: f32) -> Self {
        let delta = target - self;
        let distance = delta.length();
        if distance <= max_delta || distance < EPSILON {
            return target;
        }
        self + delta * (max_delta / distance)
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= COMPARE_EPSILON && (self.y - other.y).abs() <= COMPARE_EPSILON
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from(value: [f32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        if rhs.abs() <= EPSILON {
            return Self::ZERO;
        }
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Vector2::new(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.normalized(), Vector2::new(0.6, 0.8));
        assert_eq!(a + Vector2::ONE, Vector2::new(4.0, 5.0));
        assert_eq!(a / 0.0, Vector2::ZERO);
        assert_eq!(Vector2::RIGHT.cross(Vector2::UP), 1.0);
        assert_eq!(Vector2::RIGHT.perpendicular(), Vector2::UP);
    }

    #[test]
    fn test_helpers() {
        assert!((Vector2::RIGHT.angle(Vector2::UP) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(
            Vector2::new(1.0, -1.0).reflect(Vector2::UP),
            Vector2::new(1.0, 1.0)
        );
        assert_eq!(
            Vector2::ZERO.move_towards(Vector2::new(4.0, 0.0), 1.0),
            Vector2::RIGHT
        );
        assert_eq!(Vector2::ZERO.lerp(Vector2::ONE, 3.0), Vector2::ONE);
        assert!(Vector2::from_slice(&[1.0]).is_err());
    }
}
