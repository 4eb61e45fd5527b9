use crate::untransform::portable;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// SSE2 implementation, 16 elements (64 bytes) per iteration.
///
/// # Safety
///
/// - `plane0_ptr` through `plane3_ptr` must each be valid for reads of `element_count` bytes
/// - `output_ptr` must be valid for writes of `element_count * 4` bytes
/// - CPU must support SSE2
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn join_planes(
    mut plane0_ptr: *const u8,
    mut plane1_ptr: *const u8,
    mut plane2_ptr: *const u8,
    mut plane3_ptr: *const u8,
    mut output_ptr: *mut u8,
    element_count: usize,
) {
    let vectorized_count = element_count / 16 * 16; // round down to whole iterations
    let plane0_end = plane0_ptr.add(vectorized_count);

    while plane0_ptr < plane0_end {
        let exponent = _mm_loadu_si128(plane0_ptr as *const __m128i);
        let mantissa_high = _mm_loadu_si128(plane1_ptr as *const __m128i);
        let mantissa_mid = _mm_loadu_si128(plane2_ptr as *const __m128i);
        let mantissa_low = _mm_loadu_si128(plane3_ptr as *const __m128i);
        plane0_ptr = plane0_ptr.add(16);
        plane1_ptr = plane1_ptr.add(16);
        plane2_ptr = plane2_ptr.add(16);
        plane3_ptr = plane3_ptr.add(16);

        // little-endian byte order of the rotated element is planes [3, 2, 1, 0]
        let low_words0 = _mm_unpacklo_epi8(mantissa_low, mantissa_mid); // elements 0-7
        let low_words1 = _mm_unpackhi_epi8(mantissa_low, mantissa_mid); // elements 8-15
        let high_words0 = _mm_unpacklo_epi8(mantissa_high, exponent);
        let high_words1 = _mm_unpackhi_epi8(mantissa_high, exponent);

        let rotated0 = _mm_unpacklo_epi16(low_words0, high_words0); // elements 0-3
        let rotated1 = _mm_unpackhi_epi16(low_words0, high_words0); // elements 4-7
        let rotated2 = _mm_unpacklo_epi16(low_words1, high_words1); // elements 8-11
        let rotated3 = _mm_unpackhi_epi16(low_words1, high_words1); // elements 12-15

        // rotate right by 1; sign bit returns to bit 31
        let elements0 = _mm_or_si128(_mm_srli_epi32(rotated0, 1), _mm_slli_epi32(rotated0, 31));
        let elements1 = _mm_or_si128(_mm_srli_epi32(rotated1, 1), _mm_slli_epi32(rotated1, 31));
        let elements2 = _mm_or_si128(_mm_srli_epi32(rotated2, 1), _mm_slli_epi32(rotated2, 31));
        let elements3 = _mm_or_si128(_mm_srli_epi32(rotated3, 1), _mm_slli_epi32(rotated3, 31));

        _mm_storeu_si128(output_ptr as *mut __m128i, elements0);
        _mm_storeu_si128(output_ptr.add(16) as *mut __m128i, elements1);
        _mm_storeu_si128(output_ptr.add(32) as *mut __m128i, elements2);
        _mm_storeu_si128(output_ptr.add(48) as *mut __m128i, elements3);
        output_ptr = output_ptr.add(64);
    }

    // Handle any remaining elements
    portable::join_planes(
        plane0_ptr,
        plane1_ptr,
        plane2_ptr,
        plane3_ptr,
        output_ptr,
        element_count - vectorized_count,
    );
}

#[cfg(test)]
mod tests {
    use super::join_planes;
    use crate::test_prelude::*;

    #[test]
    fn sse2_roundtrip() {
        if !has_sse2() {
            return;
        }

        for element_count in 0..=80 {
            run_join_roundtrip_test(join_planes, element_count, "sse2");
        }
    }

    #[test]
    fn can_join_unaligned() {
        if !has_sse2() {
            return;
        }

        run_join_unaligned_test(join_planes, 67, "sse2 (unaligned)");
    }
}
