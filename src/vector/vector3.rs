use std::f32::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{
    error::{check_shape, Result},
    simd::dispatch,
    COMPARE_EPSILON, EPSILON,
};

/// Three-component vector laid out as one 16-byte SIMD lane group.
///
/// The fourth lane is padding. It is always zero-valued so that 4-lane
/// kernels can load, combine and store the vector without masking reads.
/// Equality is component-wise within [`COMPARE_EPSILON`].
///
/// Arithmetic forwards to the kernel table bound by [`crate::initialize`];
/// before initialization the portable scalar table is used.
#[repr(C, align(16))]
#[derive(Clone, Copy, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pad: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, pad: 0.0 }
    }

    #[inline]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Builds a vector from exactly three components.
    pub fn from_slice(components: &[f32]) -> Result<Self> {
        check_shape(3, components.len())?;
        Ok(Self::new(components[0], components[1], components[2]))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        (dispatch::vector3().dot)(self, rhs)
    }

    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        (dispatch::vector3().cross)(self, rhs)
    }

    #[inline]
    pub fn length(self) -> f32 {
        (dispatch::vector3().length)(self)
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        (dispatch::vector3().length_squared)(self)
    }

    #[inline]
    pub fn distance(self, rhs: Self) -> f32 {
        (dispatch::vector3().distance)(self, rhs)
    }

    #[inline]
    pub fn distance_squared(self, rhs: Self) -> f32 {
        (dispatch::vector3().distance_squared)(self, rhs)
    }

    /// Unit-length copy, or [`Vector3::ZERO`] when the length is at most [`EPSILON`].
    #[inline]
    pub fn normalized(self) -> Self {
        (dispatch::vector3().normalize)(self)
    }

    /// Normalizes in place; degenerate vectors become zero.
    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    #[inline]
    pub fn min(self, rhs: Self) -> Self {
        (dispatch::vector3().min)(self, rhs)
    }

    #[inline]
    pub fn max(self, rhs: Self) -> Self {
        (dispatch::vector3().max)(self, rhs)
    }

    #[inline]
    pub fn floor(self) -> Self {
        (dispatch::vector3().floor)(self)
    }

    #[inline]
    pub fn ceil(self) -> Self {
        (dispatch::vector3().ceil)(self)
    }

    /// Rounds each component half away from zero, like [`f32::round`].
    #[inline]
    pub fn round(self) -> Self {
        (dispatch::vector3().round)(self)
    }

    #[inline]
    pub fn abs(self) -> Self {
        (dispatch::vector3().abs)(self)
    }

    /// Component-wise product.
    #[inline]
    pub fn scale_by(self, rhs: Self) -> Self {
        (dispatch::vector3().mul)(self, rhs)
    }

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        self.lerp_unclamped(to, t.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn lerp_unclamped(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }

    /// Spherical interpolation of directions; magnitudes are interpolated linearly.
    ///
    /// Falls back to [`Vector3::lerp`] when either input is degenerate or the
    /// directions are nearly parallel.
    pub fn slerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let from_len = self.length();
        let to_len = to.length();
        if from_len <= EPSILON || to_len <= EPSILON {
            return self.lerp(to, t);
        }

        let from_dir = self / from_len;
        let to_dir = to / to_len;
        let cos_theta = from_dir.dot(to_dir).clamp(-1.0, 1.0);
        if cos_theta > 1.0 - EPSILON {
            return self.lerp(to, t);
        }

        let theta = cos_theta.acos() * t;
        let mut relative = (to_dir - from_dir * cos_theta).normalized();
        if relative == Self::ZERO {
            // Antiparallel: any perpendicular axis is a shortest arc.
            relative = from_dir.any_orthogonal();
        }

        let direction = from_dir * theta.cos() + relative * theta.sin();
        direction * (from_len + (to_len - from_len) * t)
    }

    /// Copy whose length does not exceed `max_length`.
    pub fn clamp_magnitude(self, max_length: f32) -> Self {
        if self.length_squared() > max_length * max_length {
            self.normalized() * max_length
        } else {
            self
        }
    }

    /// Projection onto `onto`; zero when `onto` is degenerate.
    pub fn project(self, onto: Self) -> Self {
        let denom = onto.length_squared();
        if denom < EPSILON {
            return Self::ZERO;
        }
        onto * (self.dot(onto) / denom)
    }

    /// Component of the vector lying in the plane with the given normal.
    pub fn project_on_plane(self, plane_normal: Self) -> Self {
        self - self.project(plane_normal)
    }

    /// Reflects `self` (a direction) off the plane defined by `normal`.
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * normal.dot(self))
    }

    /// Unsigned angle in radians between two vectors; zero if either is degenerate.
    pub fn angle(self, to: Self) -> f32 {
        let denom = (self.length_squared() * to.length_squared()).sqrt();
        if denom < EPSILON {
            return 0.0;
        }
        (self.dot(to) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Moves toward `target` by at most `max_delta`, never overshooting.
    pub fn move_towards(self, target: Self, max_delta: f32) -> Self {
        let delta = target - self;
        let distance = delta.length();
        if distance <= max_delta || distance < EPSILON {
            return target;
        }
        self + delta / distance * max_delta
    }

    /// Critically damped spring toward `target`.
    ///
    /// `velocity` carries state between frames and is updated in place.
    pub fn smooth_damp(
        self,
        target: Self,
        velocity: &mut Self,
        smooth_time: f32,
        max_speed: f32,
        delta_time: f32,
    ) -> Self {
        let smooth_time = smooth_time.max(1e-4);
        let omega = 2.0 / smooth_time;
        let x = omega * delta_time;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let original_target = target;
        let change = (self - target).clamp_magnitude(max_speed * smooth_time);
        let target = self - change;

        let temp = (*velocity + change * omega) * delta_time;
        *velocity = (*velocity - temp * omega) * decay;
        let mut output = target + (change + temp) * decay;

        // Stop at the target instead of oscillating past it.
        if (original_target - self).dot(output - original_target) > 0.0 {
            output = original_target;
            *velocity = if delta_time > 0.0 {
                (output - original_target) / delta_time
            } else {
                Self::ZERO
            };
        }
        output
    }

    /// Makes `normal` unit length and `tangent` unit length and perpendicular to it.
    pub fn ortho_normalize(normal: &mut Self, tangent: &mut Self) {
        *normal = normal.normalized();
        if *normal == Self::ZERO {
            *normal = Self::UP;
        }

        *tangent = tangent.project_on_plane(*normal).normalized();
        if *tangent == Self::ZERO {
            *tangent = normal.any_orthogonal();
        }
    }

    /// Some unit vector perpendicular to `self`.
    pub fn any_orthogonal(self) -> Self {
        let axis = if self.x.abs() < 0.9 { Self::RIGHT } else { Self::UP };
        self.cross(axis).normalized()
    }

    /// Angle in degrees, for callers that work in degrees.
    pub fn angle_degrees(self, to: Self) -> f32 {
        self.angle(to) * 180.0 / PI
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= COMPARE_EPSILON
            && (self.y - other.y).abs() <= COMPARE_EPSILON
            && (self.z - other.z).abs() <= COMPARE_EPSILON
    }
}

impl fmt::Debug for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector3")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(value: Vector3) -> Self {
        value.to_array()
    }
}

impl TryFrom<&[f32]> for Vector3 {
    type Error = crate::error::MathError;

    fn try_from(value: &[f32]) -> Result<Self> {
        Self::from_slice(value)
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index out of range: {index}"),
        }
    }
}

impl Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        (dispatch::vector3().add)(self, rhs)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        (dispatch::vector3().sub)(self, rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        (dispatch::vector3().neg)(self)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        (dispatch::vector3().scale)(self, rhs)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        (dispatch::vector3().scale)(rhs, self)
    }
}

impl Mul for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        (dispatch::vector3().mul)(self, rhs)
    }
}

/// Division by a near-zero scalar yields [`Vector3::ZERO`].
impl Div<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        (dispatch::vector3().div)(self, rhs)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}
