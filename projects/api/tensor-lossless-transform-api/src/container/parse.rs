//! Reading and validating a container.

use super::*;
use crate::error::FormatError;
use alloc::vec::Vec;
use endian_writer::{EndianReader, LittleEndianReader};
use likely_stable::unlikely;
use tensor_lossless_transform_common::ElementWidth;

/// A validated container, borrowing its plane data from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContainer<'a> {
    /// Width of the original elements.
    pub element_width: ElementWidth,
    /// Number of elements; also the decoded length of every plane.
    pub element_count: usize,
    /// One record per plane, in plane order.
    pub planes: Vec<PlaneRecord<'a>>,
}

impl ParsedContainer<'_> {
    /// Size of the uncompressed buffer this container restores to.
    #[inline]
    pub fn decompressed_len(&self) -> usize {
        // Cannot overflow: validated during parsing.
        self.element_count * self.element_width.bytes()
    }
}

/// Parses and validates `input` as a container.
///
/// On success every record lies within `input`, and the declared lengths account for every
/// byte of it. Raw records are exactly `element_count` bytes long; constant records carry exactly
/// one metadata byte and no payload.
///
/// # Errors
///
/// Returns a [`FormatError`] describing the first inconsistency found.
pub fn parse(input: &[u8]) -> Result<ParsedContainer<'_>, FormatError> {
    if unlikely(input.len() < HEADER_SIZE) {
        return Err(FormatError::HeaderTooShort {
            required: HEADER_SIZE,
            actual: input.len(),
        });
    }

    // SAFETY: `input` holds at least HEADER_SIZE bytes.
    let (header, element_count) = unsafe {
        let mut reader = LittleEndianReader::new(input.as_ptr());
        (
            ContainerHeader(reader.read_u32_at(0)),
            read_u64_at(&mut reader, 4),
        )
    };

    if unlikely(header.reserved() != 0) {
        return Err(FormatError::ReservedBitsSet { plane: None });
    }

    let width_tag = header.element_width_raw() as u8;
    let element_width =
        ElementWidth::from_tag(width_tag).ok_or(FormatError::UnknownElementWidth(width_tag))?;

    let plane_count = header.plane_count() as usize;
    if unlikely(plane_count != element_width.plane_count()) {
        return Err(FormatError::PlaneCountMismatch {
            expected: element_width.plane_count(),
            actual: plane_count,
        });
    }

    // The restored buffer must fit in a single allocation, not only a single plane.
    let element_count_usize = usize::try_from(element_count)
        .ok()
        .filter(|count| {
            count
                .checked_mul(element_width.bytes())
                .is_some_and(|len| len <= isize::MAX as usize)
        })
        .ok_or(FormatError::ElementCountOverflow(element_count))?;

    let table_end = HEADER_SIZE + plane_count * PLANE_DESCRIPTOR_SIZE;
    if unlikely(input.len() < table_end) {
        return Err(FormatError::DescriptorTableTruncated {
            required: table_end,
            actual: input.len(),
        });
    }

    let mut descriptors = Vec::with_capacity(plane_count);
    let mut declared: u64 = 0;
    let mut overflowed = false;
    for plane in 0..plane_count {
        let offset = (HEADER_SIZE + plane * PLANE_DESCRIPTOR_SIZE) as isize;
        // SAFETY: the whole descriptor table lies within `input`, checked above.
        let (descriptor, payload_len) = unsafe {
            let mut reader = LittleEndianReader::new(input.as_ptr());
            (
                PlaneDescriptor(reader.read_u32_at(offset)),
                read_u64_at(&mut reader, offset + 4),
            )
        };

        if unlikely(descriptor.reserved() != 0) {
            return Err(FormatError::ReservedBitsSet { plane: Some(plane) });
        }

        let encoding_raw = descriptor.encoding_raw() as u8;
        let encoding = PlaneEncoding::from_u8(encoding_raw).ok_or(
            FormatError::UnknownPlaneEncoding {
                plane,
                encoding: encoding_raw,
            },
        )?;

        let meta_len = descriptor.meta_len() as usize;
        let expected = match encoding {
            PlaneEncoding::Raw => Some((element_count, 0)),
            PlaneEncoding::Constant => Some((0, 1)),
            PlaneEncoding::Entropy => None,
        };
        if let Some((expected_payload, expected_meta)) = expected {
            if unlikely(payload_len != expected_payload || meta_len != expected_meta) {
                return Err(FormatError::PlaneLengthMismatch {
                    plane,
                    expected_payload,
                    actual_payload: payload_len,
                    expected_meta,
                    actual_meta: meta_len,
                });
            }
        }

        match declared
            .checked_add(meta_len as u64)
            .and_then(|sum| sum.checked_add(payload_len))
        {
            Some(sum) => declared = sum,
            None => {
                declared = u64::MAX;
                overflowed = true;
            }
        }
        descriptors.push((encoding, meta_len, payload_len));
    }

    let available = input.len() - table_end;
    if unlikely(overflowed || declared != available as u64) {
        return Err(FormatError::PayloadLengthMismatch {
            declared,
            actual: available,
        });
    }

    // Every length now sums to `available`, so each fits in usize and all slicing is in bounds.
    let mut meta_cursor = table_end;
    let mut payload_cursor = table_end
        + descriptors
            .iter()
            .map(|&(_, meta_len, _)| meta_len)
            .sum::<usize>();
    let planes = descriptors
        .into_iter()
        .map(|(encoding, meta_len, payload_len)| {
            let payload_len = payload_len as usize;
            let record = PlaneRecord {
                encoding,
                meta: &input[meta_cursor..meta_cursor + meta_len],
                payload: &input[payload_cursor..payload_cursor + payload_len],
            };
            meta_cursor += meta_len;
            payload_cursor += payload_len;
            record
        })
        .collect();

    Ok(ParsedContainer {
        element_width,
        element_count: element_count_usize,
        planes,
    })
}

/// Reads a little-endian u64 stored as two u32 halves, low half first.
///
/// # Safety
///
/// The reader's base pointer must be valid for reads of `offset + 8` bytes.
#[inline(always)]
unsafe fn read_u64_at(reader: &mut LittleEndianReader, offset: isize) -> u64 {
    let low = reader.read_u32_at(offset) as u64;
    let high = reader.read_u32_at(offset + 4) as u64;
    (high << 32) | low
}
