//! Process wide record of which vectorized path the transforms may use.
//!
//! The answer is computed on first use and never changes afterwards, so it may be read from any
//! number of threads. Transforms produce identical bytes regardless of which tier is picked; the
//! tier only affects speed.

#[cfg(feature = "std")]
use std::sync::OnceLock;

/// The widest instruction set the byte plane kernels can use on this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_enum_all_values::AllValues)]
pub enum SimdTier {
    /// Scalar code only.
    Portable,
    /// 128-bit kernels.
    Sse2,
    /// 256-bit kernels.
    Avx2,
}

impl SimdTier {
    /// Number of elements processed per loop iteration by this tier.
    ///
    /// Buffers shorter than this are handled entirely by the portable path.
    #[inline]
    pub const fn lanes(self) -> usize {
        match self {
            SimdTier::Portable => 1,
            SimdTier::Sse2 => 16,
            SimdTier::Avx2 => 32,
        }
    }
}

/// Returns `true` if a vectorized path is usable on this machine.
///
/// Conservatively `false` on architectures without vectorized kernels.
#[inline]
pub fn detect() -> bool {
    best_tier() != SimdTier::Portable
}

/// Returns the widest [`SimdTier`] available; cached after the first call.
#[inline]
pub fn best_tier() -> SimdTier {
    #[cfg(feature = "std")]
    {
        static TIER: OnceLock<SimdTier> = OnceLock::new();
        *TIER.get_or_init(probe_tier)
    }

    // cpufeatures caches each probe internally.
    #[cfg(not(feature = "std"))]
    {
        probe_tier()
    }
}

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
fn probe_tier() -> SimdTier {
    #[cfg(not(feature = "no-runtime-cpu-detection"))]
    {
        use crate::cpu_detect::*;
        if has_avx2() {
            return SimdTier::Avx2;
        }

        if has_sse2() {
            return SimdTier::Sse2;
        }
    }

    #[cfg(feature = "no-runtime-cpu-detection")]
    {
        if cfg!(target_feature = "avx2") {
            return SimdTier::Avx2;
        }

        if cfg!(target_feature = "sse2") {
            return SimdTier::Sse2;
        }
    }

    SimdTier::Portable
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
fn probe_tier() -> SimdTier {
    SimdTier::Portable
}
