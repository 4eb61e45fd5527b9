//! Bit-field arithmetic for a single 32-bit element.
//!
//! Rotating left by one bit puts the 8 exponent bits in the top byte and the sign bit at the
//! bottom of the last plane, next to the noisiest mantissa bits.

/// Splits one element into its plane bytes, most significant (exponent) first.
#[inline(always)]
pub const fn split_element(element: u32) -> [u8; 4] {
    element.rotate_left(1).to_be_bytes()
}

/// Rebuilds one element from its plane bytes. Exact inverse of [`split_element`].
#[inline(always)]
pub const fn join_element(planes: [u8; 4]) -> u32 {
    u32::from_be_bytes(planes).rotate_right(1)
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[rstest]
    #[case::one(0x3F80_0000, [0x7F, 0x00, 0x00, 0x00])]
    #[case::minus_one(0xBF80_0000, [0x7F, 0x00, 0x00, 0x01])]
    #[case::positive_zero(0x0000_0000, [0x00, 0x00, 0x00, 0x00])]
    #[case::negative_zero(0x8000_0000, [0x00, 0x00, 0x00, 0x01])]
    #[case::positive_infinity(0x7F80_0000, [0xFF, 0x00, 0x00, 0x00])]
    #[case::negative_infinity(0xFF80_0000, [0xFF, 0x00, 0x00, 0x01])]
    #[case::quiet_nan(0x7FC0_0000, [0xFF, 0x80, 0x00, 0x00])]
    #[case::all_ones_nan(0xFFFF_FFFF, [0xFF, 0xFF, 0xFF, 0xFF])]
    #[case::smallest_subnormal(0x0000_0001, [0x00, 0x00, 0x00, 0x02])]
    #[case::largest_subnormal(0x007F_FFFF, [0x00, 0xFF, 0xFF, 0xFE])]
    fn exponent_lands_in_plane_zero(#[case] element: u32, #[case] expected: [u8; 4]) {
        assert_eq!(split_element(element), expected);
        assert_eq!(join_element(expected), element);
    }

    #[test]
    fn join_inverts_split_across_bit_patterns() {
        // every 16-bit pattern in both halves, plus a stride through the full range
        for half in 0..=u16::MAX as u32 {
            for element in [half, half << 16, half | (half << 16), half.wrapping_mul(0x9E37_79B9)] {
                assert_eq!(join_element(split_element(element)), element);
            }
        }
    }

    #[test]
    fn float_values_survive() {
        for value in [
            f32::NAN,
            -f32::NAN,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::MIN_POSITIVE,
            f32::MIN_POSITIVE / 2.0,
            -0.0,
            f32::MAX,
            f32::MIN,
            1.0e-40,
        ] {
            let bits = value.to_bits();
            assert_eq!(join_element(split_element(bits)), bits);
        }
    }
}
