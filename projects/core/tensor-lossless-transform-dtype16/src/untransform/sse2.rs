use crate::untransform::portable;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// SSE2 implementation, 16 elements (32 bytes) per iteration.
///
/// # Safety
///
/// - `plane0_ptr` and `plane1_ptr` must each be valid for reads of `element_count` bytes
/// - `output_ptr` must be valid for writes of `element_count * 2` bytes
/// - CPU must support SSE2
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn join_planes(
    mut plane0_ptr: *const u8,
    mut plane1_ptr: *const u8,
    mut output_ptr: *mut u8,
    element_count: usize,
) {
    let vectorized_count = element_count / 16 * 16; // round down to whole iterations
    let plane0_end = plane0_ptr.add(vectorized_count);

    while plane0_ptr < plane0_end {
        let high = _mm_loadu_si128(plane0_ptr as *const __m128i);
        let low = _mm_loadu_si128(plane1_ptr as *const __m128i);
        plane0_ptr = plane0_ptr.add(16);
        plane1_ptr = plane1_ptr.add(16);

        // interleave as (low, high) byte pairs, i.e. little-endian u16
        let rotated0 = _mm_unpacklo_epi8(low, high);
        let rotated1 = _mm_unpackhi_epi8(low, high);

        // rotate right by 1; sign bit returns to bit 15
        let elements0 = _mm_or_si128(_mm_srli_epi16(rotated0, 1), _mm_slli_epi16(rotated0, 15));
        let elements1 = _mm_or_si128(_mm_srli_epi16(rotated1, 1), _mm_slli_epi16(rotated1, 15));

        _mm_storeu_si128(output_ptr as *mut __m128i, elements0);
        _mm_storeu_si128(output_ptr.add(16) as *mut __m128i, elements1);
        output_ptr = output_ptr.add(32);
    }

    // Handle any remaining elements
    portable::join_planes(
        plane0_ptr,
        plane1_ptr,
        output_ptr,
        element_count - vectorized_count,
    );
}
