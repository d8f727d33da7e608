//! Rotation quaternions.
//!
//! Constructed as `(w, x, y, z)` but stored in lane order `x, y, z, w` so the
//! vector part lines up with [`Vector3`] in a SIMD register.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::{
    matrix::{Matrix3, Matrix4},
    simd::dispatch,
    vector::Vector3,
    COMPARE_EPSILON, EPSILON,
};

/// Quaternion `w + xi + yj + zk`.
///
/// Not normalized implicitly; rotation helpers that need a unit quaternion
/// normalize their input or document the requirement.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis`. The axis is normalized; a
    /// degenerate axis yields the identity.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vector3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    /// Euler angles in radians, applied roll (Z) first, then pitch (X), then yaw (Y).
    pub fn from_euler(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();
        let (sr, cr) = (roll * 0.5).sin_cos();
        Self::new(
            cy * cp * cr + sy * sp * sr,
            cy * sp * cr + sy * cp * sr,
            sy * cp * cr - cy * sp * sr,
            cy * cp * sr - sy * sp * cr,
        )
    }

    /// Shortest rotation taking direction `from` onto direction `to`.
    pub fn from_to_rotation(from: Vector3, to: Vector3) -> Self {
        let f = from.normalized();
        let t = to.normalized();
        if f == Vector3::ZERO || t == Vector3::ZERO {
            return Self::IDENTITY;
        }

        let d = f.dot(t);
        if d >= 1.0 - EPSILON {
            return Self::IDENTITY;
        }
        if d <= -1.0 + EPSILON {
            return Self::from_axis_angle(f.any_orthogonal(), std::f32::consts::PI);
        }

        let axis = f.cross(t);
        Self::new(1.0 + d, axis.x, axis.y, axis.z).normalized()
    }

    /// Rotation whose local +Z axis points along `forward` and whose +Y axis is
    /// as close to `up` as possible.
    pub fn look_rotation(forward: Vector3, up: Vector3) -> Self {
        let f = forward.normalized();
        if f == Vector3::ZERO {
            return Self::IDENTITY;
        }

        let r = up.cross(f).normalized();
        if r == Vector3::ZERO {
            // `up` is parallel to `forward`
            return Self::from_to_rotation(Vector3::FORWARD, f);
        }
        let u = f.cross(r);
        Self::from_rotation_matrix(&Matrix3::from_rows([
            [r.x, u.x, f.x],
            [r.y, u.y, f.y],
            [r.z, u.z, f.z],
        ]))
    }

    /// Quaternion of a pure rotation matrix.
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        let (m00, m01, m02) = (m.get(0, 0), m.get(0, 1), m.get(0, 2));
        let (m10, m11, m12) = (m.get(1, 0), m.get(1, 1), m.get(1, 2));
        let (m20, m21, m22) = (m.get(2, 0), m.get(2, 1), m.get(2, 2));
        let trace = m00 + m11 + m22;

        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(0.25 * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
        };
        q.normalized()
    }

    #[inline]
    pub fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse; identity when the squared length is below [`EPSILON`].
    pub fn inverse(self) -> Self {
        let length_squared = self.length_squared();
        if length_squared < EPSILON {
            return Self::IDENTITY;
        }
        self.conjugate() * (1.0 / length_squared)
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        (dispatch::quaternion().dot)(self, rhs)
    }

    #[inline]
    pub fn length(self) -> f32 {
        (dispatch::quaternion().length)(self)
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        (dispatch::quaternion().length_squared)(self)
    }

    /// Unit quaternion, or the identity for degenerate input.
    #[inline]
    pub fn normalized(self) -> Self {
        (dispatch::quaternion().normalize)(self)
    }

    /// Angle in radians between two orientations.
    pub fn angle_between(self, rhs: Self) -> f32 {
        let d = self.normalized().dot(rhs.normalized()).abs().min(1.0);
        2.0 * d.acos()
    }

    /// Axis and angle in radians. The axis defaults to +X for a null rotation.
    pub fn to_axis_angle(self) -> (Vector3, f32) {
        let q = self.normalized();
        let w = q.w.clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos();
        let s = (1.0 - w * w).sqrt();
        if s < EPSILON {
            (Vector3::RIGHT, angle)
        } else {
            (q.xyz() / s, angle)
        }
    }

    pub fn to_matrix3(self) -> Matrix3 {
        Matrix3::from_quaternion(self)
    }

    pub fn to_matrix4(self) -> Matrix4 {
        Matrix4::from_quaternion(self)
    }

    /// Rotates `v` by this (unit) quaternion.
    pub fn rotate_vector(self, v: Vector3) -> Vector3 {
        let u = self.xyz();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Spherical interpolation along the shortest arc, `t` clamped to `[0, 1]`.
    pub fn slerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut to = to;
        let mut d = self.dot(to);
        if d < 0.0 {
            to = -to;
            d = -d;
        }

        // Nearly parallel: the sine denominator loses precision.
        if d > 0.9995 {
            return (self + (to - self) * t).normalized();
        }

        let theta_0 = d.min(1.0).acos();
        let theta = theta_0 * t;
        let sin_theta_0 = theta_0.sin();
        let s0 = theta.cos() - d * theta.sin() / sin_theta_0;
        let s1 = theta.sin() / sin_theta_0;
        (self * s0 + to * s1).normalized()
    }

    /// Normalized linear interpolation along the shortest arc, `t` clamped to `[0, 1]`.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let to = if self.dot(to) < 0.0 { -to } else { to };
        (self * (1.0 - t) + to * t).normalized()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= COMPARE_EPSILON
            && (self.y - other.y).abs() <= COMPARE_EPSILON
            && (self.z - other.z).abs() <= COMPARE_EPSILON
            && (self.w - other.w).abs() <= COMPARE_EPSILON
    }
}

impl fmt::Debug for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quaternion")
            .field("w", &self.w)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}

impl Add for Quaternion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        (dispatch::quaternion().add)(self, rhs)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        (dispatch::quaternion().sub)(self, rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

/// Hamilton product; `a * b` applies `b` first.
impl Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        (dispatch::quaternion().mul)(self, rhs)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        (dispatch::quaternion().scale)(self, rhs)
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate_vector(rhs)
    }
}
