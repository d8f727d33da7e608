//! Matrix types.
//!
//! Row-major storage with the column-vector convention throughout. [`Matrix3`]
//! and [`Matrix4`] forward their arithmetic to the bound kernel tables;
//! [`Matrix2`] and [`MatrixMN`] are portable.

mod dynamic;
mod matrix2;
mod matrix3;
mod matrix4;

pub use dynamic::MatrixMN;
pub use matrix2::Matrix2;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
