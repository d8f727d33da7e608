//! Fixed-size vectors.
//!
//! [`Vector3`] routes its arithmetic through the runtime-bound kernel tables;
//! [`Vector2`] and [`Vector4`] are portable.

mod vector2;
mod vector3;
mod vector4;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
