//! Join 4 byte planes back into 32-bit elements using the best known implementation for the current CPU.
//!
//! For the inverse, see the [`transform`](crate::transform) module.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx2;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse2;

pub(crate) mod portable;

/// Interleaves 4 byte planes back into elements.
///
/// # Safety
///
/// - `plane0_ptr` through `plane3_ptr` must each be valid for reads of `element_count` bytes
/// - `output_ptr` must be valid for writes of `element_count * 4` bytes
/// - No buffers may overlap
#[inline]
pub(crate) unsafe fn join_planes_with_separate_pointers(
    plane0_ptr: *const u8,
    plane1_ptr: *const u8,
    plane2_ptr: *const u8,
    plane3_ptr: *const u8,
    output_ptr: *mut u8,
    element_count: usize,
) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        use tensor_lossless_transform_common::capability::{best_tier, SimdTier};

        let tier = best_tier();
        if tier >= SimdTier::Avx2 && element_count >= SimdTier::Avx2.lanes() {
            avx2::join_planes(
                plane0_ptr,
                plane1_ptr,
                plane2_ptr,
                plane3_ptr,
                output_ptr,
                element_count,
            );
            return;
        }

        if tier >= SimdTier::Sse2 && element_count >= SimdTier::Sse2.lanes() {
            sse2::join_planes(
                plane0_ptr,
                plane1_ptr,
                plane2_ptr,
                plane3_ptr,
                output_ptr,
                element_count,
            );
            return;
        }
    }

    portable::join_planes(
        plane0_ptr,
        plane1_ptr,
        plane2_ptr,
        plane3_ptr,
        output_ptr,
        element_count,
    )
}
