use crate::element::split_element;
use core::ptr::read_unaligned;
use multiversion::multiversion;

/// Portable fallback, one element per iteration.
///
/// Also handles the tail left over by the vectorized implementations.
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 2` bytes
/// - `plane0_ptr` and `plane1_ptr` must each be valid for writes of `element_count` bytes
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
pub(crate) unsafe fn split_planes(
    mut input_ptr: *const u8,
    mut plane0_ptr: *mut u8,
    mut plane1_ptr: *mut u8,
    element_count: usize,
) {
    unsafe {
        for _ in 0..element_count {
            let element = u16::from_le(read_unaligned(input_ptr as *const u16));
            let [high, low] = split_element(element);
            *plane0_ptr = high;
            *plane1_ptr = low;

            input_ptr = input_ptr.add(2);
            plane0_ptr = plane0_ptr.add(1);
            plane1_ptr = plane1_ptr.add(1);
        }
    }
}
