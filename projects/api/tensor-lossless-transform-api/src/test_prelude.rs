//! Common test imports and utilities for api tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Allocation
pub use alloc::{vec, vec::Vec};

pub use tensor_lossless_transform_common::ElementWidth;

use crate::coder::{EncodedPlane, EntropyCoder};

/// Builds a 64 byte container of four constant 32-bit planes declaring `element_count`
/// elements, without checking the count against anything.
pub(crate) fn constant_planes_container(element_count: u64) -> Vec<u8> {
    let header = (ElementWidth::Bits32.tag() as u32) | (4 << 4);
    let mut container = header.to_le_bytes().to_vec();
    container.extend_from_slice(&element_count.to_le_bytes());
    for _ in 0..4 {
        // Constant encoding, one metadata byte, empty payload.
        container.extend_from_slice(&[0x02, 0x01, 0x00, 0x00]);
        container.extend_from_slice(&0u64.to_le_bytes());
    }
    // Planes of 1.0f32.
    container.extend_from_slice(&[0x7F, 0x00, 0x00, 0x00]);
    container
}

/// Generates `element_count` little-endian elements whose values repeat in runs of 8,
/// so planes are neither constant nor incompressible.
pub(crate) fn generate_tensor_bytes(width: ElementWidth, element_count: usize) -> Vec<u8> {
    let mut output = Vec::with_capacity(element_count * width.bytes());
    for index in 0..element_count {
        let step = (index / 8) as u32;
        match width {
            ElementWidth::Bits16 => {
                let value = 0x3F80u16.wrapping_add((step % 97) as u16 * 0x0103);
                output.extend_from_slice(&value.to_le_bytes());
            }
            ElementWidth::Bits32 => {
                let value = 0x3F80_0000u32.wrapping_add((step % 251) * 0x0001_0203);
                output.extend_from_slice(&value.to_le_bytes());
            }
        }
    }
    output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MockMode {
    #[default]
    RunLength,
    Inflating,
    Truncating,
}

/// Run length coder for tests: `(run, byte)` pairs, runs of at most 255.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MockCoder {
    mode: MockMode,
}

impl MockCoder {
    /// Encodes to something larger than the input, forcing raw storage.
    pub(crate) fn inflating() -> Self {
        Self {
            mode: MockMode::Inflating,
        }
    }

    /// Decodes one byte short.
    pub(crate) fn truncating() -> Self {
        Self {
            mode: MockMode::Truncating,
        }
    }
}

impl EntropyCoder for MockCoder {
    type Error = &'static str;

    fn encode(&self, plane: &[u8]) -> Result<EncodedPlane, Self::Error> {
        let mut compressed = Vec::new();
        let mut bytes = plane.iter().copied().peekable();
        while let Some(byte) = bytes.next() {
            let mut run = 1u8;
            while run < u8::MAX && bytes.peek() == Some(&byte) {
                bytes.next();
                run += 1;
            }
            compressed.push(run);
            compressed.push(byte);
        }

        let meta = match self.mode {
            MockMode::Inflating => vec![0u8; plane.len() + 1],
            _ => Vec::new(),
        };
        Ok(EncodedPlane { compressed, meta })
    }

    fn decode(
        &self,
        compressed: &[u8],
        _meta: &[u8],
        _expected_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        if compressed.len() % 2 != 0 {
            return Err("odd run length stream");
        }

        let mut output = Vec::new();
        for pair in compressed.chunks_exact(2) {
            output.extend(core::iter::repeat(pair[1]).take(pair[0] as usize));
        }
        if self.mode == MockMode::Truncating {
            output.pop();
        }
        Ok(output)
    }
}

/// Coder which fails every call.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FailingCoder;

impl EntropyCoder for FailingCoder {
    type Error = &'static str;

    fn encode(&self, _plane: &[u8]) -> Result<EncodedPlane, Self::Error> {
        Err("encode refused")
    }

    fn decode(
        &self,
        _compressed: &[u8],
        _meta: &[u8],
        _expected_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        Err("decode refused")
    }
}
