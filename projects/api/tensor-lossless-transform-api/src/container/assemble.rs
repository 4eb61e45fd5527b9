//! Serializing plane records into a container.

use super::*;
use crate::error::InvalidInputError;
use alloc::vec;
use alloc::vec::Vec;
use endian_writer::{EndianWriter, LittleEndianWriter};
use tensor_lossless_transform_common::ElementWidth;

/// Size of the container [`assemble`] would produce for `planes`.
pub fn assembled_len(planes: &[PlaneRecord<'_>]) -> usize {
    HEADER_SIZE
        + planes.len() * PLANE_DESCRIPTOR_SIZE
        + planes.iter().map(PlaneRecord::stored_len).sum::<usize>()
}

/// Serializes `planes` into a new container.
///
/// `planes` must be in plane order, one per plane of `element_width`.
///
/// # Errors
///
/// - [`InvalidInputError::PlaneCountMismatch`] if the number of records is wrong
/// - [`InvalidInputError::MetadataTooLarge`] if metadata exceeds [`MAX_META_LEN`]
/// - [`InvalidInputError::InconsistentPlaneRecord`] if a raw or constant record would not
///   parse back
pub fn assemble(
    element_width: ElementWidth,
    element_count: usize,
    planes: &[PlaneRecord<'_>],
) -> Result<Vec<u8>, InvalidInputError> {
    validate_records(element_width, element_count, planes)?;

    let mut output = vec![0u8; assembled_len(planes)];

    let mut header = ContainerHeader::default();
    header.set_element_width_raw(element_width.tag() as u32);
    header.set_plane_count(planes.len() as u32);

    // SAFETY: `output` is sized by `assembled_len`, which covers the header and every
    // descriptor written below.
    unsafe {
        let mut writer = LittleEndianWriter::new(output.as_mut_ptr());
        writer.write_u32_at(header.0, 0);
        write_u64_at(&mut writer, element_count as u64, 4);

        for (index, plane) in planes.iter().enumerate() {
            let offset = (HEADER_SIZE + index * PLANE_DESCRIPTOR_SIZE) as isize;
            let mut descriptor = PlaneDescriptor::default();
            descriptor.set_encoding_raw(plane.encoding.to_u8() as u32);
            descriptor.set_meta_len(plane.meta.len() as u32);

            writer.write_u32_at(descriptor.0, offset);
            write_u64_at(&mut writer, plane.payload.len() as u64, offset + 4);
        }
    }

    let mut cursor = HEADER_SIZE + planes.len() * PLANE_DESCRIPTOR_SIZE;
    for plane in planes {
        output[cursor..cursor + plane.meta.len()].copy_from_slice(plane.meta);
        cursor += plane.meta.len();
    }
    for plane in planes {
        output[cursor..cursor + plane.payload.len()].copy_from_slice(plane.payload);
        cursor += plane.payload.len();
    }

    Ok(output)
}

fn validate_records(
    element_width: ElementWidth,
    element_count: usize,
    planes: &[PlaneRecord<'_>],
) -> Result<(), InvalidInputError> {
    if planes.len() != element_width.plane_count() {
        return Err(InvalidInputError::PlaneCountMismatch {
            expected: element_width.plane_count(),
            actual: planes.len(),
        });
    }

    for (index, plane) in planes.iter().enumerate() {
        if plane.meta.len() > MAX_META_LEN {
            return Err(InvalidInputError::MetadataTooLarge {
                plane: index,
                length: plane.meta.len(),
                max: MAX_META_LEN,
            });
        }

        let consistent = match plane.encoding {
            PlaneEncoding::Raw => plane.payload.len() == element_count && plane.meta.is_empty(),
            PlaneEncoding::Constant => plane.payload.is_empty() && plane.meta.len() == 1,
            PlaneEncoding::Entropy => true,
        };
        if !consistent {
            return Err(InvalidInputError::InconsistentPlaneRecord { plane: index });
        }
    }

    Ok(())
}

/// Writes a little-endian u64 as two u32 halves, low half first.
///
/// # Safety
///
/// The writer's base pointer must be valid for writes of `offset + 8` bytes.
#[inline(always)]
unsafe fn write_u64_at(writer: &mut LittleEndianWriter, value: u64, offset: isize) {
    writer.write_u32_at(value as u32, offset);
    writer.write_u32_at((value >> 32) as u32, offset + 4);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn assembles_documented_layout() {
        let plane0 = [0x7F_u8, 0x7F, 0x7F];
        let records = [
            PlaneRecord {
                encoding: PlaneEncoding::Constant,
                meta: &plane0[..1],
                payload: &[],
            },
            PlaneRecord::raw(&[1, 2, 3]),
        ];

        let container = assemble(ElementWidth::Bits16, 3, &records).unwrap();

        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x20, 0x00, 0x00, 0x00, // header: dtype16, 2 planes
            0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // element count
            0x02, 0x01, 0x00, 0x00, // plane 0: constant, 1 metadata byte
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // plane 0 payload length
            0x00, 0x00, 0x00, 0x00, // plane 1: raw, no metadata
            0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // plane 1 payload length
            0x7F, // plane 0 metadata
            0x01, 0x02, 0x03, // plane 1 payload
        ];
        assert_eq!(container, expected);
        assert_eq!(container.len(), assembled_len(&records));
    }

    #[test]
    fn rejects_wrong_plane_count() {
        let records = [PlaneRecord::raw(&[0])];
        assert_eq!(
            assemble(ElementWidth::Bits32, 1, &records),
            Err(InvalidInputError::PlaneCountMismatch {
                expected: 4,
                actual: 1
            })
        );
    }

    #[rstest]
    #[case::raw_wrong_length(PlaneEncoding::Raw, &[], &[1, 2])]
    #[case::raw_with_metadata(PlaneEncoding::Raw, &[9], &[1])]
    #[case::constant_without_metadata(PlaneEncoding::Constant, &[], &[])]
    #[case::constant_with_payload(PlaneEncoding::Constant, &[1], &[1])]
    fn rejects_inconsistent_records(
        #[case] encoding: PlaneEncoding,
        #[case] meta: &[u8],
        #[case] payload: &[u8],
    ) {
        let records = [
            PlaneRecord {
                encoding,
                meta,
                payload,
            },
            PlaneRecord::raw(&[0]),
        ];
        assert_eq!(
            assemble(ElementWidth::Bits16, 1, &records),
            Err(InvalidInputError::InconsistentPlaneRecord { plane: 0 })
        );
    }
}
