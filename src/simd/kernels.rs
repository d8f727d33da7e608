//! Kernel tables: one function-pointer slot per tiered operation.
//!
//! Every tier provides a complete table for each type. Slots a tier does not
//! accelerate are copied from the tier below with struct-update syntax, so a
//! table is never partially filled.

use crate::{
    error::Result,
    matrix::{Matrix3, Matrix4},
    quaternion::Quaternion,
    vector::{Vector3, Vector4},
};

#[derive(Debug, Clone, Copy)]
pub struct Vector3Kernels {
    pub add: fn(Vector3, Vector3) -> Vector3,
    pub sub: fn(Vector3, Vector3) -> Vector3,
    pub neg: fn(Vector3) -> Vector3,
    /// Component-wise product.
    pub mul: fn(Vector3, Vector3) -> Vector3,
    pub scale: fn(Vector3, f32) -> Vector3,
    /// Division by a scalar; `|s| <= EPSILON` yields zero.
    pub div: fn(Vector3, f32) -> Vector3,
    pub dot: fn(Vector3, Vector3) -> f32,
    pub cross: fn(Vector3, Vector3) -> Vector3,
    pub length: fn(Vector3) -> f32,
    pub length_squared: fn(Vector3) -> f32,
    pub distance: fn(Vector3, Vector3) -> f32,
    pub distance_squared: fn(Vector3, Vector3) -> f32,
    /// Unit vector, or zero when `length <= EPSILON`.
    pub normalize: fn(Vector3) -> Vector3,
    pub min: fn(Vector3, Vector3) -> Vector3,
    pub max: fn(Vector3, Vector3) -> Vector3,
    pub floor: fn(Vector3) -> Vector3,
    pub ceil: fn(Vector3) -> Vector3,
    /// Half away from zero.
    pub round: fn(Vector3) -> Vector3,
    pub abs: fn(Vector3) -> Vector3,
}

#[derive(Debug, Clone, Copy)]
pub struct Matrix3Kernels {
    pub mul: fn(&Matrix3, &Matrix3) -> Matrix3,
    pub add: fn(&Matrix3, &Matrix3) -> Matrix3,
    pub sub: fn(&Matrix3, &Matrix3) -> Matrix3,
    pub scale: fn(&Matrix3, f32) -> Matrix3,
    pub transpose: fn(&Matrix3) -> Matrix3,
    pub determinant: fn(&Matrix3) -> f32,
    pub inverse: fn(&Matrix3) -> Result<Matrix3>,
    pub transform: fn(&Matrix3, Vector3) -> Vector3,
}

#[derive(Debug, Clone, Copy)]
pub struct Matrix4Kernels {
    pub mul: fn(&Matrix4, &Matrix4) -> Matrix4,
    pub add: fn(&Matrix4, &Matrix4) -> Matrix4,
    pub sub: fn(&Matrix4, &Matrix4) -> Matrix4,
    pub scale: fn(&Matrix4, f32) -> Matrix4,
    pub transpose: fn(&Matrix4) -> Matrix4,
    pub determinant: fn(&Matrix4) -> f32,
    pub inverse: fn(&Matrix4) -> Result<Matrix4>,
    /// `w = 1` with perspective divide; a zero `w` leaves `xyz` undivided.
    pub transform_point: fn(&Matrix4, Vector3) -> Vector3,
    /// `w = 0`, no divide.
    pub transform_vector: fn(&Matrix4, Vector3) -> Vector3,
    pub transform_vector4: fn(&Matrix4, Vector4) -> Vector4,
}

#[derive(Debug, Clone, Copy)]
pub struct QuaternionKernels {
    pub add: fn(Quaternion, Quaternion) -> Quaternion,
    pub sub: fn(Quaternion, Quaternion) -> Quaternion,
    /// Hamilton product.
    pub mul: fn(Quaternion, Quaternion) -> Quaternion,
    pub scale: fn(Quaternion, f32) -> Quaternion,
    pub dot: fn(Quaternion, Quaternion) -> f32,
    pub length: fn(Quaternion) -> f32,
    pub length_squared: fn(Quaternion) -> f32,
    /// Unit quaternion, or the identity when `length <= EPSILON`.
    pub normalize: fn(Quaternion) -> Quaternion,
}

/// Slice kernels. They process the common prefix of their slices; the public
/// wrappers in [`crate::batch`] reject mismatched lengths before calling them.
#[derive(Debug, Clone, Copy)]
pub struct BatchKernels {
    pub add: fn(&[Vector3], &[Vector3], &mut [Vector3]),
    pub scale: fn(&[Vector3], f32, &mut [Vector3]),
    pub normalize: fn(&[Vector3], &mut [Vector3]),
    pub dot: fn(&[Vector3], &[Vector3], &mut [f32]),
    pub transform: fn(&Matrix4, &[Vector3], &mut [Vector3]),
}
