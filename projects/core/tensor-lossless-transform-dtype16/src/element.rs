//! Bit-field arithmetic for a single 16-bit element.
//!
//! The element is rotated left by one bit so the sign bit lands next to the low mantissa bits.
//! The high byte then holds exponent bits only (for bf16), which repeat heavily across a tensor.

/// Splits one element into its plane bytes, `[plane0, plane1]`.
#[inline(always)]
pub const fn split_element(element: u16) -> [u8; 2] {
    let rotated = element.rotate_left(1);
    [(rotated >> 8) as u8, rotated as u8]
}

/// Rebuilds one element from its plane bytes. Exact inverse of [`split_element`].
#[inline(always)]
pub const fn join_element(planes: [u8; 2]) -> u16 {
    (((planes[0] as u16) << 8) | planes[1] as u16).rotate_right(1)
}
