use crate::transform::portable;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// AVX2 implementation, 32 elements (64 bytes) per iteration.
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 2` bytes
/// - `plane0_ptr` and `plane1_ptr` must each be valid for writes of `element_count` bytes
/// - CPU must support AVX2
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn split_planes(
    mut input_ptr: *const u8,
    mut plane0_ptr: *mut u8,
    mut plane1_ptr: *mut u8,
    element_count: usize,
) {
    let vectorized_count = element_count / 32 * 32; // round down to whole iterations
    let input_end = input_ptr.add(vectorized_count * 2);
    let low_byte_mask = _mm256_set1_epi16(0x00FF);

    while input_ptr < input_end {
        let elements0 = _mm256_loadu_si256(input_ptr as *const __m256i);
        let elements1 = _mm256_loadu_si256(input_ptr.add(32) as *const __m256i);
        input_ptr = input_ptr.add(64);

        let rotated0 = _mm256_or_si256(
            _mm256_slli_epi16(elements0, 1),
            _mm256_srli_epi16(elements0, 15),
        );
        let rotated1 = _mm256_or_si256(
            _mm256_slli_epi16(elements1, 1),
            _mm256_srli_epi16(elements1, 15),
        );

        // packus works per 128-bit lane, giving qwords [0-7, 16-23, 8-15, 24-31]
        let high = _mm256_packus_epi16(
            _mm256_srli_epi16(rotated0, 8),
            _mm256_srli_epi16(rotated1, 8),
        );
        let low = _mm256_packus_epi16(
            _mm256_and_si256(rotated0, low_byte_mask),
            _mm256_and_si256(rotated1, low_byte_mask),
        );

        // restore element order: qwords [0, 2, 1, 3]
        let high = _mm256_permute4x64_epi64(high, 0b11_01_10_00);
        let low = _mm256_permute4x64_epi64(low, 0b11_01_10_00);

        _mm256_storeu_si256(plane0_ptr as *mut __m256i, high);
        _mm256_storeu_si256(plane1_ptr as *mut __m256i, low);
        plane0_ptr = plane0_ptr.add(32);
        plane1_ptr = plane1_ptr.add(32);
    }

    // Handle any remaining elements
    portable::split_planes(
        input_ptr,
        plane0_ptr,
        plane1_ptr,
        element_count - vectorized_count,
    );
}
