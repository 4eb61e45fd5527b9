use crate::transform::portable;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// AVX2 implementation, 32 elements (128 bytes) per iteration.
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 4` bytes
/// - `plane0_ptr` through `plane3_ptr` must each be valid for writes of `element_count` bytes
/// - CPU must support AVX2
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn split_planes(
    mut input_ptr: *const u8,
    mut plane0_ptr: *mut u8,
    mut plane1_ptr: *mut u8,
    mut plane2_ptr: *mut u8,
    mut plane3_ptr: *mut u8,
    element_count: usize,
) {
    let vectorized_count = element_count / 32 * 32; // round down to whole iterations
    let input_end = input_ptr.add(vectorized_count * 4);
    let byte_mask = _mm256_set1_epi32(0xFF);

    // The packs below run per 128-bit lane, leaving dwords holding elements
    // [0-3, 8-11, 16-19, 24-27, 4-7, 12-15, 20-23, 28-31]; this puts them back in order.
    let restore_order = _mm256_setr_epi32(0, 4, 1, 5, 2, 6, 3, 7);

    while input_ptr < input_end {
        let elements0 = _mm256_loadu_si256(input_ptr as *const __m256i);
        let elements1 = _mm256_loadu_si256(input_ptr.add(32) as *const __m256i);
        let elements2 = _mm256_loadu_si256(input_ptr.add(64) as *const __m256i);
        let elements3 = _mm256_loadu_si256(input_ptr.add(96) as *const __m256i);
        input_ptr = input_ptr.add(128);

        let rotated0 = _mm256_or_si256(
            _mm256_slli_epi32(elements0, 1),
            _mm256_srli_epi32(elements0, 31),
        );
        let rotated1 = _mm256_or_si256(
            _mm256_slli_epi32(elements1, 1),
            _mm256_srli_epi32(elements1, 31),
        );
        let rotated2 = _mm256_or_si256(
            _mm256_slli_epi32(elements2, 1),
            _mm256_srli_epi32(elements2, 31),
        );
        let rotated3 = _mm256_or_si256(
            _mm256_slli_epi32(elements3, 1),
            _mm256_srli_epi32(elements3, 31),
        );

        macro_rules! gather_byte {
            ($shift:literal) => {
                _mm256_permutevar8x32_epi32(
                    _mm256_packus_epi16(
                        _mm256_packs_epi32(
                            _mm256_and_si256(_mm256_srli_epi32(rotated0, $shift), byte_mask),
                            _mm256_and_si256(_mm256_srli_epi32(rotated1, $shift), byte_mask),
                        ),
                        _mm256_packs_epi32(
                            _mm256_and_si256(_mm256_srli_epi32(rotated2, $shift), byte_mask),
                            _mm256_and_si256(_mm256_srli_epi32(rotated3, $shift), byte_mask),
                        ),
                    ),
                    restore_order,
                )
            };
        }

        let exponent = gather_byte!(24);
        let mantissa_high = gather_byte!(16);
        let mantissa_mid = gather_byte!(8);
        let mantissa_low = gather_byte!(0);

        _mm256_storeu_si256(plane0_ptr as *mut __m256i, exponent);
        _mm256_storeu_si256(plane1_ptr as *mut __m256i, mantissa_high);
        _mm256_storeu_si256(plane2_ptr as *mut __m256i, mantissa_mid);
        _mm256_storeu_si256(plane3_ptr as *mut __m256i, mantissa_low);
        plane0_ptr = plane0_ptr.add(32);
        plane1_ptr = plane1_ptr.add(32);
        plane2_ptr = plane2_ptr.add(32);
        plane3_ptr = plane3_ptr.add(32);
    }

    // Handle any remaining elements
    portable::split_planes(
        input_ptr,
        plane0_ptr,
        plane1_ptr,
        plane2_ptr,
        plane3_ptr,
        element_count - vectorized_count,
    );
}
