//! SSE2 tier: 128-bit kernels written against [`f32x4::F32x4`].

pub(crate) mod batch;
pub(crate) mod f32x4;
pub(crate) mod matrix3;
pub(crate) mod matrix4;
pub(crate) mod quaternion;
pub(crate) mod vector3;
