use crate::transform::portable;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// SSE2 implementation, 16 elements (32 bytes) per iteration.
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 2` bytes
/// - `plane0_ptr` and `plane1_ptr` must each be valid for writes of `element_count` bytes
/// - CPU must support SSE2
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn split_planes(
    mut input_ptr: *const u8,
    mut plane0_ptr: *mut u8,
    mut plane1_ptr: *mut u8,
    element_count: usize,
) {
    let vectorized_count = element_count / 16 * 16; // round down to whole iterations
    let input_end = input_ptr.add(vectorized_count * 2);
    let low_byte_mask = _mm_set1_epi16(0x00FF);

    while input_ptr < input_end {
        let elements0 = _mm_loadu_si128(input_ptr as *const __m128i);
        let elements1 = _mm_loadu_si128(input_ptr.add(16) as *const __m128i);
        input_ptr = input_ptr.add(32);

        // rotate left by 1; sign bit moves to bit 0
        let rotated0 = _mm_or_si128(_mm_slli_epi16(elements0, 1), _mm_srli_epi16(elements0, 15));
        let rotated1 = _mm_or_si128(_mm_slli_epi16(elements1, 1), _mm_srli_epi16(elements1, 15));

        // each 16-bit lane holds 0..=255 after masking/shifting, so the saturating pack is exact
        let high = _mm_packus_epi16(_mm_srli_epi16(rotated0, 8), _mm_srli_epi16(rotated1, 8));
        let low = _mm_packus_epi16(
            _mm_and_si128(rotated0, low_byte_mask),
            _mm_and_si128(rotated1, low_byte_mask),
        );

        _mm_storeu_si128(plane0_ptr as *mut __m128i, high);
        _mm_storeu_si128(plane1_ptr as *mut __m128i, low);
        plane0_ptr = plane0_ptr.add(16);
        plane1_ptr = plane1_ptr.add(16);
    }

    // Handle any remaining elements
    portable::split_planes(
        input_ptr,
        plane0_ptr,
        plane1_ptr,
        element_count - vectorized_count,
    );
}
