//! Helpers for CPU feature detection without using std.
//!
//! These use the `cpufeatures` crate, which runs CPUID once per feature and caches the result
//! in an atomic; every subsequent call is a load and compare.

/// Checks if the CPU supports AVX2 instructions.
///
/// AVX2 gives 256-bit integer shifts, packs and unpacks; the byte plane kernels process
/// 32 elements per iteration with it.
#[inline]
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub fn has_avx2() -> bool {
    cpufeatures::new!(cpuid_avx2, "avx2");
    cpuid_avx2::get()
}

/// Checks if the CPU supports SSE2 instructions.
///
/// Available on every x86-64 processor. This is the baseline vectorized tier.
#[inline]
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub fn has_sse2() -> bool {
    cpufeatures::new!(cpuid_sse2, "sse2");
    cpuid_sse2::get()
}
