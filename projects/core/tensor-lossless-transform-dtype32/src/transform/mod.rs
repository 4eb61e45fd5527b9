//! Split 32-bit elements into 4 byte planes using the best known implementation for the current CPU.
//!
//! For the inverse, see the [`untransform`](crate::untransform) module.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx2;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse2;

pub(crate) mod portable;

/// Splits interleaved elements into 4 byte planes.
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 4` bytes
/// - `plane0_ptr` through `plane3_ptr` must each be valid for writes of `element_count` bytes
/// - No buffers may overlap
#[inline]
pub(crate) unsafe fn split_planes_with_separate_pointers(
    input_ptr: *const u8,
    plane0_ptr: *mut u8,
    plane1_ptr: *mut u8,
    plane2_ptr: *mut u8,
    plane3_ptr: *mut u8,
    element_count: usize,
) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        use tensor_lossless_transform_common::capability::{best_tier, SimdTier};

        // Buffers shorter than one iteration go straight to the portable loop.
        let tier = best_tier();
        if tier >= SimdTier::Avx2 && element_count >= SimdTier::Avx2.lanes() {
            avx2::split_planes(
                input_ptr,
                plane0_ptr,
                plane1_ptr,
                plane2_ptr,
                plane3_ptr,
                element_count,
            );
            return;
        }

        if tier >= SimdTier::Sse2 && element_count >= SimdTier::Sse2.lanes() {
            sse2::split_planes(
                input_ptr,
                plane0_ptr,
                plane1_ptr,
                plane2_ptr,
                plane3_ptr,
                element_count,
            );
            return;
        }
    }

    portable::split_planes(
        input_ptr,
        plane0_ptr,
        plane1_ptr,
        plane2_ptr,
        plane3_ptr,
        element_count,
    )
}
