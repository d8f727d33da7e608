//! Runtime binding of the kernel tables.
//!
//! Each value type reads its kernels through a [`Binding`] static. A binding
//! starts out pointing at the scalar table, so arithmetic is correct before
//! [`initialize`] runs; initialization swaps in the best tier the host
//! supports, exactly once per process. Reading a binding is a single atomic
//! load with no branch on CPU features.

use std::sync::atomic::{AtomicPtr, AtomicU8, Ordering};
use std::sync::Once;

use super::{
    config::DispatchConfig,
    detect::cpu_features,
    kernels::{BatchKernels, Matrix3Kernels, Matrix4Kernels, QuaternionKernels, Vector3Kernels},
    scalar,
    tier::Tier,
};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use super::{avx, sse2, sse41};

/// A process-wide slot holding a `'static` kernel table.
pub struct Binding<T: Sync + 'static> {
    slot: AtomicPtr<T>,
}

impl<T: Sync + 'static> Binding<T> {
    /// A binding that initially points at `table`.
    pub const fn new(table: &'static T) -> Self {
        Self {
            slot: AtomicPtr::new(table as *const T as *mut T),
        }
    }

    /// The currently bound table.
    #[inline(always)]
    pub fn get(&self) -> &'static T {
        // SAFETY: the slot only ever holds pointers obtained from `&'static T`
        // and is never written through.
        unsafe { &*self.slot.load(Ordering::Acquire) }
    }

    pub(crate) fn bind(&self, table: &'static T) {
        self.slot
            .store(table as *const T as *mut T, Ordering::Release);
    }
}

static VECTOR3: Binding<Vector3Kernels> = Binding::new(&scalar::vector3::KERNELS);
static MATRIX3: Binding<Matrix3Kernels> = Binding::new(&scalar::matrix3::KERNELS);
static MATRIX4: Binding<Matrix4Kernels> = Binding::new(&scalar::matrix4::KERNELS);
static QUATERNION: Binding<QuaternionKernels> = Binding::new(&scalar::quaternion::KERNELS);
static BATCH: Binding<BatchKernels> = Binding::new(&scalar::batch::KERNELS);

static INIT: Once = Once::new();
static ACTIVE_TIER: AtomicU8 = AtomicU8::new(0);

#[inline(always)]
pub fn vector3() -> &'static Vector3Kernels {
    VECTOR3.get()
}

#[inline(always)]
pub fn matrix3() -> &'static Matrix3Kernels {
    MATRIX3.get()
}

#[inline(always)]
pub fn matrix4() -> &'static Matrix4Kernels {
    MATRIX4.get()
}

#[inline(always)]
pub fn quaternion() -> &'static QuaternionKernels {
    QUATERNION.get()
}

#[inline(always)]
pub fn batch() -> &'static BatchKernels {
    BATCH.get()
}

/// Detects CPU features and binds every kernel table to the best supported
/// tier, honouring the `SIMDGEO_MAX_TIER` environment cap.
///
/// Idempotent: only the first call binds; later calls return the tier that
/// was selected then.
pub fn initialize() -> Tier {
    initialize_with(DispatchConfig::from_env())
}

/// [`initialize`] with an explicit configuration.
///
/// The configuration of the first call wins.
pub fn initialize_with(config: DispatchConfig) -> Tier {
    let mut bound_now = false;
    INIT.call_once(|| {
        bind_all(config);
        bound_now = true;
    });
    if !bound_now {
        tracing::debug!(tier = %active_tier(), "SIMD dispatch already initialized");
    }
    active_tier()
}

fn bind_all(config: DispatchConfig) {
    let features = cpu_features();
    if let Some(cap) = config.max_tier {
        if !features.supports(cap) {
            tracing::warn!(%cap, "configured SIMD tier is not supported by this CPU");
        }
    }

    let tier = config.select(features.best_tier());
    let dispatch = Dispatch::resolve(tier);
    VECTOR3.bind(dispatch.vector3);
    MATRIX3.bind(dispatch.matrix3);
    MATRIX4.bind(dispatch.matrix4);
    QUATERNION.bind(dispatch.quaternion);
    BATCH.bind(dispatch.batch);
    ACTIVE_TIER.store(tier.to_index(), Ordering::Release);

    tracing::info!(%tier, ?features, "SIMD dispatch bound");
}

pub fn is_initialized() -> bool {
    INIT.is_completed()
}

/// Tier the tables are bound to; [`Tier::Scalar`] before initialization.
pub fn active_tier() -> Tier {
    Tier::from_index(ACTIVE_TIER.load(Ordering::Acquire))
}

/// The kernel tables of one tier, as an explicit strategy object.
///
/// The global bindings cover normal use. `Dispatch` lets benchmarks and tests
/// drive a specific tier side by side with the others.
#[derive(Debug, Clone, Copy)]
pub struct Dispatch {
    pub tier: Tier,
    pub vector3: &'static Vector3Kernels,
    pub matrix3: &'static Matrix3Kernels,
    pub matrix4: &'static Matrix4Kernels,
    pub quaternion: &'static QuaternionKernels,
    pub batch: &'static BatchKernels,
}

impl Dispatch {
    pub const SCALAR: Dispatch = Dispatch {
        tier: Tier::Scalar,
        vector3: &scalar::vector3::KERNELS,
        matrix3: &scalar::matrix3::KERNELS,
        matrix4: &scalar::matrix4::KERNELS,
        quaternion: &scalar::quaternion::KERNELS,
        batch: &scalar::batch::KERNELS,
    };

    /// Tables of `tier`, or `None` when this CPU cannot run it.
    pub fn for_tier(tier: Tier) -> Option<Dispatch> {
        if cpu_features().supports(tier) {
            Some(Self::resolve(tier))
        } else {
            None
        }
    }

    /// Every tier this CPU can run, lowest first.
    pub fn supported() -> Vec<Dispatch> {
        Tier::ALL.iter().filter_map(|tier| Self::for_tier(*tier)).collect()
    }

    /// The tables currently bound globally.
    pub fn active() -> Dispatch {
        Dispatch {
            tier: active_tier(),
            vector3: vector3(),
            matrix3: matrix3(),
            matrix4: matrix4(),
            quaternion: quaternion(),
            batch: batch(),
        }
    }

    /// Callers must only pass tiers the host supports.
    fn resolve(tier: Tier) -> Dispatch {
        match tier {
            Tier::Scalar => Self::SCALAR,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::Sse2 => Dispatch {
                tier,
                vector3: &sse2::vector3::KERNELS,
                matrix3: &sse2::matrix3::KERNELS,
                matrix4: &sse2::matrix4::KERNELS,
                quaternion: &sse2::quaternion::KERNELS,
                batch: &sse2::batch::KERNELS,
            },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::Sse41 => Dispatch {
                tier,
                vector3: &sse41::vector3::KERNELS,
                matrix3: &sse41::matrix3::KERNELS,
                matrix4: &sse41::matrix4::KERNELS,
                quaternion: &sse41::quaternion::KERNELS,
                batch: &sse2::batch::KERNELS,
            },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::Avx => Dispatch {
                tier,
                vector3: &sse41::vector3::KERNELS,
                matrix3: &sse41::matrix3::KERNELS,
                matrix4: &avx::matrix4::KERNELS,
                quaternion: &sse41::quaternion::KERNELS,
                batch: &avx::batch::KERNELS,
            },
            #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
            _ => Self::SCALAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE_A: [u32; 2] = [1, 2];
    static TABLE_B: [u32; 2] = [3, 4];

    #[test]
    fn test_binding_starts_at_default() {
        let binding = Binding::new(&TABLE_A);
        assert_eq!(binding.get(), &[1, 2]);
        binding.bind(&TABLE_B);
        assert_eq!(binding.get(), &[3, 4]);
    }

    #[test]
    fn test_scalar_dispatch_is_always_supported() {
        let scalar = Dispatch::for_tier(Tier::Scalar).unwrap();
        assert_eq!(scalar.tier, Tier::Scalar);
        assert!(!Dispatch::supported().is_empty());
    }

    #[test]
    fn test_for_tier_matches_detection() {
        let features = cpu_features();
        for tier in Tier::ALL {
            assert_eq!(Dispatch::for_tier(tier).is_some(), features.supports(tier));
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let first = initialize_with(DispatchConfig::default());
        let second = initialize_with(DispatchConfig::default().with_max_tier(Tier::Scalar));
        assert_eq!(first, second);
        assert!(is_initialized());
        assert_eq!(active_tier(), first);
        assert_eq!(Dispatch::active().tier, first);
    }
}
