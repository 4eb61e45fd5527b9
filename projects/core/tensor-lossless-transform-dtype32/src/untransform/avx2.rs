use crate::untransform::portable;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// AVX2 implementation, 32 elements (128 bytes) per iteration.
///
/// # Safety
///
/// - `plane0_ptr` through `plane3_ptr` must each be valid for reads of `element_count` bytes
/// - `output_ptr` must be valid for writes of `element_count * 4` bytes
/// - CPU must support AVX2
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn join_planes(
    mut plane0_ptr: *const u8,
    mut plane1_ptr: *const u8,
    mut plane2_ptr: *const u8,
    mut plane3_ptr: *const u8,
    mut output_ptr: *mut u8,
    element_count: usize,
) {
    let vectorized_count = element_count / 32 * 32; // round down to whole iterations
    let plane0_end = plane0_ptr.add(vectorized_count);

    while plane0_ptr < plane0_end {
        // qwords [0, 2, 1, 3]: lane 0 holds elements 0-7 and 16-23, lane 1 holds 8-15 and 24-31
        let exponent = _mm256_permute4x64_epi64(
            _mm256_loadu_si256(plane0_ptr as *const __m256i),
            0b11_01_10_00,
        );
        let mantissa_high = _mm256_permute4x64_epi64(
            _mm256_loadu_si256(plane1_ptr as *const __m256i),
            0b11_01_10_00,
        );
        let mantissa_mid = _mm256_permute4x64_epi64(
            _mm256_loadu_si256(plane2_ptr as *const __m256i),
            0b11_01_10_00,
        );
        let mantissa_low = _mm256_permute4x64_epi64(
            _mm256_loadu_si256(plane3_ptr as *const __m256i),
            0b11_01_10_00,
        );
        plane0_ptr = plane0_ptr.add(32);
        plane1_ptr = plane1_ptr.add(32);
        plane2_ptr = plane2_ptr.add(32);
        plane3_ptr = plane3_ptr.add(32);

        let low_words0 = _mm256_unpacklo_epi8(mantissa_low, mantissa_mid); // elements 0-15
        let low_words1 = _mm256_unpackhi_epi8(mantissa_low, mantissa_mid); // elements 16-31
        let high_words0 = _mm256_unpacklo_epi8(mantissa_high, exponent);
        let high_words1 = _mm256_unpackhi_epi8(mantissa_high, exponent);

        // per lane unpacks yield [0-3 | 8-11] and [4-7 | 12-15] (likewise for 16-31)
        let interleaved0 = _mm256_unpacklo_epi16(low_words0, high_words0);
        let interleaved1 = _mm256_unpackhi_epi16(low_words0, high_words0);
        let interleaved2 = _mm256_unpacklo_epi16(low_words1, high_words1);
        let interleaved3 = _mm256_unpackhi_epi16(low_words1, high_words1);

        let rotated0 = _mm256_permute2x128_si256(interleaved0, interleaved1, 0x20); // elements 0-7
        let rotated1 = _mm256_permute2x128_si256(interleaved0, interleaved1, 0x31); // elements 8-15
        let rotated2 = _mm256_permute2x128_si256(interleaved2, interleaved3, 0x20); // elements 16-23
        let rotated3 = _mm256_permute2x128_si256(interleaved2, interleaved3, 0x31); // elements 24-31

        let elements0 = _mm256_or_si256(
            _mm256_srli_epi32(rotated0, 1),
            _mm256_slli_epi32(rotated0, 31),
        );
        let elements1 = _mm256_or_si256(
            _mm256_srli_epi32(rotated1, 1),
            _mm256_slli_epi32(rotated1, 31),
        );
        let elements2 = _mm256_or_si256(
            _mm256_srli_epi32(rotated2, 1),
            _mm256_slli_epi32(rotated2, 31),
        );
        let elements3 = _mm256_or_si256(
            _mm256_srli_epi32(rotated3, 1),
            _mm256_slli_epi32(rotated3, 31),
        );

        _mm256_storeu_si256(output_ptr as *mut __m256i, elements0);
        _mm256_storeu_si256(output_ptr.add(32) as *mut __m256i, elements1);
        _mm256_storeu_si256(output_ptr.add(64) as *mut __m256i, elements2);
        _mm256_storeu_si256(output_ptr.add(96) as *mut __m256i, elements3);
        output_ptr = output_ptr.add(128);
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
