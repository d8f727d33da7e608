//! Tiered kernels and their runtime binding.
//!
//! `scalar` is the portable reference tier. On x86 targets `sse2`, `sse41`
//! and `avx` provide accelerated tables; [`dispatch`] binds the best one the
//! host supports.

pub mod config;
pub mod detect;
pub mod dispatch;
pub mod kernels;
pub mod tier;
pub mod traits;

pub(crate) mod scalar;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse2;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse41;

pub use config::DispatchConfig;
pub use detect::{cpu_features, CpuFeatures};
pub use dispatch::{active_tier, initialize, initialize_with, is_initialized, Dispatch};
pub use tier::Tier;
pub use traits::BatchOps;
