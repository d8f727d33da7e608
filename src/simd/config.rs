//! Dispatch configuration.
//!
//! The only knob is an upper bound on the tier the binding step may select,
//! useful for reproducing scalar results on wide hardware or for comparing
//! tiers in benchmarks. It is read once, when the tables are bound.

use std::env;

use super::tier::Tier;

/// Environment variable capping the selected tier (`scalar`, `sse2`, `sse4.1`, `avx`).
pub const MAX_TIER_ENV: &str = "SIMDGEO_MAX_TIER";

/// Options for [`crate::initialize_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Highest tier the binding step may select. `None` means no cap.
    pub max_tier: Option<Tier>,
}

impl DispatchConfig {
    /// Caps the selected tier.
    pub fn with_max_tier(mut self, tier: Tier) -> Self {
        self.max_tier = Some(tier);
        self
    }

    /// Reads [`MAX_TIER_ENV`]. Unset or invalid values leave the tier uncapped.
    pub fn from_env() -> Self {
        match env::var(MAX_TIER_ENV) {
            Ok(value) => Self::from_env_value(&value),
            Err(_) => Self::default(),
        }
    }

    fn from_env_value(value: &str) -> Self {
        match value.parse::<Tier>() {
            Ok(tier) => Self::default().with_max_tier(tier),
            Err(err) => {
                tracing::warn!(%err, "ignoring {MAX_TIER_ENV}");
                Self::default()
            }
        }
    }

    /// Best tier the given host tier may be bound to under this configuration.
    pub fn select(&self, host_best: Tier) -> Tier {
        match self.max_tier {
            Some(cap) => host_best.min(cap),
            None => host_best,
        }
    }
}
