use crate::element::join_element;
use core::ptr::write_unaligned;
use multiversion::multiversion;

/// Portable fallback, one element per iteration.
///
/// # Safety
///
/// - `plane0_ptr` and `plane1_ptr` must each be valid for reads of `element_count` bytes
/// - `output_ptr` must be valid for writes of `element_count * 2` bytes
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
pub(crate) unsafe fn join_planes(
    mut plane0_ptr: *const u8,
    mut plane1_ptr: *const u8,
    mut output_ptr: *mut u8,
    element_count: usize,
) {
    unsafe {
        for _ in 0..element_count {
            let element = join_element([*plane0_ptr, *plane1_ptr]);
            write_unaligned(output_ptr as *mut u16, element.to_le());

            plane0_ptr = plane0_ptr.add(1);
            plane1_ptr = plane1_ptr.add(1);
            output_ptr = output_ptr.add(2);
        }
    }
}
