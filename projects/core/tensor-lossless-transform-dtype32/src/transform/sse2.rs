use crate::transform::portable;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// SSE2 implementation, 16 elements (64 bytes) per iteration.
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 4` bytes
/// - `plane0_ptr` through `plane3_ptr` must each be valid for writes of `element_count` bytes
/// - CPU must support SSE2
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn split_planes(
    mut input_ptr: *const u8,
    mut plane0_ptr: *mut u8,
    mut plane1_ptr: *mut u8,
    mut plane2_ptr: *mut u8,
    mut plane3_ptr: *mut u8,
    element_count: usize,
) {
    let vectorized_count = element_count / 16 * 16; // round down to whole iterations
    let input_end = input_ptr.add(vectorized_count * 4);
    let byte_mask = _mm_set1_epi32(0xFF);

    while input_ptr < input_end {
        let elements0 = _mm_loadu_si128(input_ptr as *const __m128i);
        let elements1 = _mm_loadu_si128(input_ptr.add(16) as *const __m128i);
        let elements2 = _mm_loadu_si128(input_ptr.add(32) as *const __m128i);
        let elements3 = _mm_loadu_si128(input_ptr.add(48) as *const __m128i);
        input_ptr = input_ptr.add(64);

        // rotate left by 1; sign bit moves to bit 0
        let rotated0 = _mm_or_si128(_mm_slli_epi32(elements0, 1), _mm_srli_epi32(elements0, 31));
        let rotated1 = _mm_or_si128(_mm_slli_epi32(elements1, 1), _mm_srli_epi32(elements1, 31));
        let rotated2 = _mm_or_si128(_mm_slli_epi32(elements2, 1), _mm_srli_epi32(elements2, 31));
        let rotated3 = _mm_or_si128(_mm_slli_epi32(elements3, 1), _mm_srli_epi32(elements3, 31));

        // Gather one byte of each dword into 16 bytes. Every lane holds 0..=255 after
        // masking, so neither saturating pack changes a value.
        macro_rules! gather_byte {
            ($shift:literal) => {
                _mm_packus_epi16(
                    _mm_packs_epi32(
                        _mm_and_si128(_mm_srli_epi32(rotated0, $shift), byte_mask),
                        _mm_and_si128(_mm_srli_epi32(rotated1, $shift), byte_mask),
                    ),
                    _mm_packs_epi32(
                        _mm_and_si128(_mm_srli_epi32(rotated2, $shift), byte_mask),
                        _mm_and_si128(_mm_srli_epi32(rotated3, $shift), byte_mask),
                    ),
                )
            };
        }

        let exponent = gather_byte!(24);
        let mantissa_high = gather_byte!(16);
        let mantissa_mid = gather_byte!(8);
        let mantissa_low = gather_byte!(0);

        _mm_storeu_si128(plane0_ptr as *mut __m128i, exponent);
        _mm_storeu_si128(plane1_ptr as *mut __m128i, mantissa_high);
        _mm_storeu_si128(plane2_ptr as *mut __m128i, mantissa_mid);
        _mm_storeu_si128(plane3_ptr as *mut __m128i, mantissa_low);
        plane0_ptr = plane0_ptr.add(16);
        plane1_ptr = plane1_ptr.add(16);
        plane2_ptr = plane2_ptr.add(16);
        plane3_ptr = plane3_ptr.add(16);
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
