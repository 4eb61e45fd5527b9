//! The compressed container: a header, one descriptor per plane, then the plane data.
//!
//! # Layout
//!
//! All integers are little endian.
//!
//! ```text
//! Offset | Size  | Field
//! -------|-------|----------------------------------------------------------
//! 0      | 4     | ContainerHeader: u4 element width tag, u4 plane count, u24 reserved
//! 4      | 8     | element count
//! 12     | 12*k  | per plane: PlaneDescriptor (u2 encoding, u6 reserved, u24 metadata
//!        |       | length) followed by the u64 payload length
//! ...    | sum m | coder metadata, plane order
//! ...    | sum p | payloads, plane order
//! ```
//!
//! There is no magic or version field. Any structural mismatch is rejected by [`parse`],
//! which never reads beyond the lengths it has validated.
use bitfield::bitfield;

pub mod assemble;
pub mod parse;

pub use assemble::{assemble, assembled_len};
pub use parse::{parse, ParsedContainer};

/// Size of the fixed header (header word + element count).
pub const HEADER_SIZE: usize = 12;

/// Size of one plane descriptor (descriptor word + payload length).
pub const PLANE_DESCRIPTOR_SIZE: usize = 12;

/// Largest metadata length a descriptor can record.
pub const MAX_META_LEN: usize = (1 << 24) - 1;

bitfield! {
    /// First word of every container.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContainerHeader(u32);
    impl Debug;
    u32;

    /// Element width tag (4 bits), see [`ElementWidth::tag`](tensor_lossless_transform_common::ElementWidth::tag)
    pub element_width_raw, set_element_width_raw: 3, 0;
    /// Number of planes (4 bits)
    pub plane_count, set_plane_count: 7, 4;
    /// Must be zero (24 bits)
    pub reserved, set_reserved: 31, 8;
}

bitfield! {
    /// First word of every plane descriptor.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlaneDescriptor(u32);
    impl Debug;
    u32;

    /// [`PlaneEncoding`] (2 bits)
    pub encoding_raw, set_encoding_raw: 1, 0;
    /// Must be zero (6 bits)
    pub reserved, set_reserved: 7, 2;
    /// Coder metadata length in bytes (24 bits)
    pub meta_len, set_meta_len: 31, 8;
}

/// How a plane's bytes are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlaneEncoding {
    /// Payload is the plane itself. Used when coding would not help or the coder failed.
    Raw = 0,
    /// Payload and metadata came from the entropy coder.
    Entropy = 1,
    /// Every byte of the plane equals the single metadata byte; no payload.
    Constant = 2,
}

impl PlaneEncoding {
    /// Converts a raw descriptor value; `None` for unassigned values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(PlaneEncoding::Raw),
            1 => Some(PlaneEncoding::Entropy),
            2 => Some(PlaneEncoding::Constant),
            _ => None,
        }
    }

    /// Value stored in the descriptor.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// One plane as stored in a container: how it is encoded plus borrowed metadata and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneRecord<'a> {
    /// Storage mode.
    pub encoding: PlaneEncoding,
    /// Coder metadata, or the repeated byte for [`PlaneEncoding::Constant`].
    pub meta: &'a [u8],
    /// Plane payload.
    pub payload: &'a [u8],
}

impl<'a> PlaneRecord<'a> {
    /// A plane stored as is.
    #[inline]
    pub fn raw(plane: &'a [u8]) -> Self {
        Self {
            encoding: PlaneEncoding::Raw,
            meta: &[],
            payload: plane,
        }
    }

    /// Bytes of metadata and payload this record adds after the descriptor table.
    #[inline]
    pub fn stored_len(&self) -> usize {
        self.meta.len() + self.payload.len()
    }
}
