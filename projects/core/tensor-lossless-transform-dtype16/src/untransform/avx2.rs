use crate::untransform::portable;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// AVX2 implementation, 32 elements (64 bytes) per iteration.
///
/// # Safety
///
/// - `plane0_ptr` and `plane1_ptr` must each be valid for reads of `element_count` bytes
/// - `output_ptr` must be valid for writes of `element_count * 2` bytes
/// - CPU must support AVX2
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn join_planes(
    mut plane0_ptr: *const u8,
    mut plane1_ptr: *const u8,
    mut output_ptr: *mut u8,
    element_count: usize,
) {
    let vectorized_count = element_count / 32 * 32; // round down to whole iterations
    let plane0_end = plane0_ptr.add(vectorized_count);

    while plane0_ptr < plane0_end {
        // qwords [0, 2, 1, 3] so the per-lane unpacks below produce elements in order
        let high = _mm256_permute4x64_epi64(
            _mm256_loadu_si256(plane0_ptr as *const __m256i),
            0b11_01_10_00,
        );
        let low = _mm256_permute4x64_epi64(
            _mm256_loadu_si256(plane1_ptr as *const __m256i),
            0b11_01_10_00,
        );
        plane0_ptr = plane0_ptr.add(32);
        plane1_ptr = plane1_ptr.add(32);

        let rotated0 = _mm256_unpacklo_epi8(low, high); // elements 0-15
        let rotated1 = _mm256_unpackhi_epi8(low, high); // elements 16-31

        let elements0 = _mm256_or_si256(
            _mm256_srli_epi16(rotated0, 1),
            _mm256_slli_epi16(rotated0, 15),
        );
        let elements1 = _mm256_or_si256(
            _mm256_srli_epi16(rotated1, 1),
            _mm256_slli_epi16(rotated1, 15),
        );

        _mm256_storeu_si256(output_ptr as *mut __m256i, elements0);
        _mm256_storeu_si256(output_ptr.add(32) as *mut __m256i, elements1);
        output_ptr = output_ptr.add(64);
    }

    // Handle any remaining elements
    portable::join_planes(
        plane0_ptr,
        plane1_ptr,
        output_ptr,
        element_count - vectorized_count,
    );
}
