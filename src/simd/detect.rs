//! Runtime CPU feature detection.
//!
//! The host is queried once per process; every dispatch table reads the same
//! cached [`CpuFeatures`] value. Targets without x86 SIMD report every flag as
//! `false`, which selects the scalar tier everywhere.

use std::sync::OnceLock;

use super::tier::Tier;

static FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Instruction-set extensions relevant to the kernel tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    pub sse2: bool,
    pub sse3: bool,
    pub sse41: bool,
    pub sse42: bool,
    pub avx: bool,
    pub avx2: bool,
}

impl CpuFeatures {
    /// Queries the running processor.
    ///
    /// Pure function of the hardware (and OS support for the wider register
    /// state); it never fails. Prefer [`cpu_features`], which caches the result.
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            Self {
                sse2: is_x86_feature_detected!("sse2"),
                sse3: is_x86_feature_detected!("sse3"),
                sse41: is_x86_feature_detected!("sse4.1"),
                sse42: is_x86_feature_detected!("sse4.2"),
                avx: is_x86_feature_detected!("avx"),
                avx2: is_x86_feature_detected!("avx2"),
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            Self::default()
        }
    }

    /// A feature set with nothing available.
    pub const fn none() -> Self {
        Self {
            sse2: false,
            sse3: false,
            sse41: false,
            sse42: false,
            avx: false,
            avx2: false,
        }
    }

    /// Whether every instruction the given tier relies on is present.
    pub fn supports(&self, tier: Tier) -> bool {
        match tier {
            Tier::Scalar => true,
            Tier::Sse2 => self.sse2,
            Tier::Sse41 => self.sse2 && self.sse41,
            // The AVX tables inherit SSE4.1 slots.
            Tier::Avx => self.sse2 && self.sse41 && self.avx,
        }
    }

    /// Highest tier this feature set supports.
    pub fn best_tier(&self) -> Tier {
        Tier::ALL
            .iter()
            .rev()
            .copied()
            .find(|tier| self.supports(*tier))
            .unwrap_or(Tier::Scalar)
    }
}

/// Cached feature set of the host, detected on first use.
#[inline]
pub fn cpu_features() -> CpuFeatures {
    *FEATURES.get_or_init(|| {
        let features = CpuFeatures::detect();
        tracing::debug!(?features, "detected CPU features");
        features
    })
}
