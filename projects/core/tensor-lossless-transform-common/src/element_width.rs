//! Element widths supported by the byte plane transforms.

use derive_enum_all_values::AllValues;

/// Width of a single tensor element.
///
/// The width alone decides how many byte planes a buffer is split into;
/// planes are always one byte per element.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
#[repr(u8)]
pub enum ElementWidth {
    /// 16-bit elements (bf16, fp16). Split into 2 planes.
    Bits16 = 0,
    /// 32-bit elements (fp32). Split into 4 planes.
    Bits32 = 1,
}

impl ElementWidth {
    /// Maps a width in bits (16 or 32) to an [`ElementWidth`].
    #[inline]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(ElementWidth::Bits16),
            32 => Some(ElementWidth::Bits32),
            _ => None,
        }
    }

    /// Maps a serialized tag back to an [`ElementWidth`].
    #[inline]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ElementWidth::Bits16),
            1 => Some(ElementWidth::Bits32),
            _ => None,
        }
    }

    /// Serialized tag of this width.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            ElementWidth::Bits16 => 16,
            ElementWidth::Bits32 => 32,
        }
    }

    /// Width in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            ElementWidth::Bits16 => 2,
            ElementWidth::Bits32 => 4,
        }
    }

    /// Number of byte planes a buffer of this width is split into.
    #[inline]
    pub const fn plane_count(self) -> usize {
        self.bytes()
    }
}
