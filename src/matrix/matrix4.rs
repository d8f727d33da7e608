use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

use crate::{
    error::{check_shape, Result},
    quaternion::Quaternion,
    simd::dispatch,
    vector::{Vector3, Vector4},
    COMPARE_EPSILON, DETERMINANT_EPSILON,
};

use super::Matrix3;

/// 4x4 matrix stored row-major in one 64-byte block.
///
/// Vectors are columns: `m * v` transforms `v`, translation lives in the last
/// column, and `a * b` applies `b` first. Every row starts on a 16-byte
/// boundary so the SIMD tiers load rows with aligned instructions.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub struct Matrix4 {
    m: [f32; 16],
}

impl Matrix4 {
    pub const ZERO: Self = Self::from_array([0.0; 16]);
    pub const IDENTITY: Self = Self::from_array([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Row-major elements.
    #[inline]
    pub const fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut m = [0.0; 16];
        let mut i = 0;
        while i < 4 {
            let mut j = 0;
            while j < 4 {
                m[i * 4 + j] = rows[i][j];
                j += 1;
            }
            i += 1;
        }
        Self { m }
    }

    /// Builds a matrix from 16 row-major elements.
    pub fn from_slice(elements: &[f32]) -> Result<Self> {
        check_shape(16, elements.len())?;
        let mut m = [0.0; 16];
        m.copy_from_slice(elements);
        Ok(Self { m })
    }

    /// Embeds a 3x3 linear part with no translation.
    pub fn from_matrix3(linear: &Matrix3) -> Self {
        let mut out = Self::IDENTITY;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i * 4 + j] = linear.get(i, j);
            }
        }
        out
    }

    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(&self.m[i * 4..i * 4 + 4]);
        }
        rows
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[offset(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.m[offset(row, col)] = value;
    }

    pub fn row(&self, i: usize) -> Vector4 {
        Vector4::new(self.get(i, 0), self.get(i, 1), self.get(i, 2), self.get(i, 3))
    }

    pub fn column(&self, j: usize) -> Vector4 {
        Vector4::new(self.get(0, j), self.get(1, j), self.get(2, j), self.get(3, j))
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const f32 {
        self.m.as_ptr()
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut f32 {
        self.m.as_mut_ptr()
    }

    pub fn translation(offset: Vector3) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, offset.x],
            [0.0, 1.0, 0.0, offset.y],
            [0.0, 0.0, 1.0, offset.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scale(factors: Vector3) -> Self {
        Self::from_rows([
            [factors.x, 0.0, 0.0, 0.0],
            [0.0, factors.y, 0.0, 0.0],
            [0.0, 0.0, factors.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_x(angle: f32) -> Self {
        Self::from_matrix3(&Matrix3::rotation_x(angle))
    }

    pub fn rotation_y(angle: f32) -> Self {
        Self::from_matrix3(&Matrix3::rotation_y(angle))
    }

    pub fn rotation_z(angle: f32) -> Self {
        Self::from_matrix3(&Matrix3::rotation_z(angle))
    }

    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        Self::from_quaternion(Quaternion::from_axis_angle(axis, angle))
    }

    pub fn from_quaternion(rotation: Quaternion) -> Self {
        Self::from_matrix3(&Matrix3::from_quaternion(rotation))
    }

    /// Translation * rotation * scale.
    pub fn trs(translation: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        let linear = Matrix3::from_quaternion(rotation);
        let factors = [scale.x, scale.y, scale.z];
        let offset = [translation.x, translation.y, translation.z];
        let mut out = Self::IDENTITY;
        for i in 0..3 {
            for j in 0..3 {
                out.m[i * 4 + j] = linear.get(i, j) * factors[j];
            }
            out.m[i * 4 + 3] = offset[i];
        }
        out
    }

    /// Right-handed view matrix looking from `eye` toward `target`.
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let f = (target - eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(f);
        Self::from_rows([
            [s.x, s.y, s.z, -s.dot(eye)],
            [u.x, u.y, u.z, -u.dot(eye)],
            [-f.x, -f.y, -f.z, f.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection onto a `[-1, 1]` depth range.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let depth = near - far;
        Self::from_rows([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) / depth, 2.0 * far * near / depth],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        Self::from_rows([
            [2.0 / width, 0.0, 0.0, -(right + left) / width],
            [0.0, 2.0 / height, 0.0, -(top + bottom) / height],
            [0.0, 0.0, -2.0 / depth, -(far + near) / depth],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        (dispatch::matrix4().transpose)(self)
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        (dispatch::matrix4().determinant)(self)
    }

    /// Inverse, or [`crate::MathError::SingularMatrix`] when `|det| <= DETERMINANT_EPSILON`.
    #[inline]
    pub fn inverse(&self) -> Result<Self> {
        (dispatch::matrix4().inverse)(self)
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > DETERMINANT_EPSILON
    }

    /// Transforms a point (implicit `w = 1`) with perspective divide.
    ///
    /// When the resulting `w` is exactly zero the undivided `xyz` is returned.
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        (dispatch::matrix4().transform_point)(self, point)
    }

    /// Transforms a direction (implicit `w = 0`); translation is ignored.
    #[inline]
    pub fn transform_vector(&self, direction: Vector3) -> Vector3 {
        (dispatch::matrix4().transform_vector)(self, direction)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix4 {
    fn eq(&self, other: &Self) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= COMPARE_EPSILON)
    }
}

impl fmt::Debug for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix4").field("rows", &self.to_rows()).finish()
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "[{}, {}, {}, {}]", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[offset(row, col)]
    }
}

/// Row-major position of `(row, col)`; panics outside the 4x4 grid.
#[inline]
fn offset(row: usize, col: usize) -> usize {
    assert!(row < 4 && col < 4, "Matrix4 index out of range: ({row}, {col})");
    row * 4 + col
}

impl Mul for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        (dispatch::matrix4().mul)(&self, &rhs)
    }
}

impl Mul<&Matrix4> for &Matrix4 {
    type Output = Matrix4;

    #[inline]
    fn mul(self, rhs: &Matrix4) -> Matrix4 {
        (dispatch::matrix4().mul)(self, rhs)
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        (dispatch::matrix4().scale)(&self, rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    #[inline]
    fn mul(self, rhs: Vector4) -> Vector4 {
        (dispatch::matrix4().transform_vector4)(&self, rhs)
    }
}

impl Add for Matrix4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        (dispatch::matrix4().add)(&self, &rhs)
    }
}

impl Sub for Matrix4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        (dispatch::matrix4().sub)(&self, &rhs)
    }
}
