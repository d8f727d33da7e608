//! Portable tier. Always available; every wider tier falls back to it per operation.

pub(crate) mod batch;
pub(crate) mod matrix3;
pub(crate) mod matrix4;
pub(crate) mod quaternion;
pub(crate) mod vector3;
