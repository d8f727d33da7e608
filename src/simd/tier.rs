//! Implementation tiers, ordered from portable to widest.

use std::fmt;
use std::str::FromStr;

use crate::error::MathError;

/// One implementation level of the kernel set.
///
/// Ordering follows binding priority: a higher tier wins whenever the host
/// supports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Portable implementation, always available.
    Scalar,
    /// 128-bit SSE2.
    Sse2,
    /// 128-bit SSE4.1 (dot-product and rounding instructions).
    Sse41,
    /// 256-bit AVX.
    Avx,
}

impl Tier {
    /// Every tier, lowest priority first.
    pub const ALL: [Tier; 4] = [Tier::Scalar, Tier::Sse2, Tier::Sse41, Tier::Avx];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Scalar => "scalar",
            Tier::Sse2 => "sse2",
            Tier::Sse41 => "sse4.1",
            Tier::Avx => "avx",
        }
    }

    /// Number of `Vector3` values a batch kernel of this tier processes per iteration.
    pub fn batch_width(&self) -> usize {
        match self {
            Tier::Scalar | Tier::Sse2 | Tier::Sse41 => 1,
            Tier::Avx => 2,
        }
    }

    pub(crate) fn to_index(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_index(index: u8) -> Tier {
        match index {
            1 => Tier::Sse2,
            2 => Tier::Sse41,
            3 => Tier::Avx,
            _ => Tier::Scalar,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Scalar => write!(f, "Scalar"),
            Tier::Sse2 => write!(f, "SSE2"),
            Tier::Sse41 => write!(f, "SSE4.1"),
            Tier::Avx => write!(f, "AVX"),
        }
    }
}

impl FromStr for Tier {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Tier::Scalar),
            "sse2" => Ok(Tier::Sse2),
            "sse4.1" | "sse41" | "sse4_1" => Ok(Tier::Sse41),
            "avx" => Ok(Tier::Avx),
            _ => Err(MathError::InvalidTier {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_priority() {
        assert!(Tier::Avx > Tier::Sse41);
        assert!(Tier::Sse41 > Tier::Sse2);
        assert!(Tier::Sse2 > Tier::Scalar);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for tier in Tier::ALL {
            assert_eq!(tier.name().parse::<Tier>().unwrap(), tier);
        }
        assert_eq!(" SSE41 ".parse::<Tier>().unwrap(), Tier::Sse41);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "avx512".parse::<Tier>(),
            Err(MathError::InvalidTier { .. })
        ));
    }

    #[test]
    fn test_index_round_trip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_index(tier.to_index()), tier);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Tier::Sse41), "SSE4.1");
    }
}
