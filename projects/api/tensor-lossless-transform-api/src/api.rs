//! Compression and decompression entry points.
//!
//! Compression splits the input into byte planes, codes every plane on its own and assembles the
//! results into a container. Planes that the coder cannot shrink (or fails on) are stored raw,
//! so the output never exceeds [`max_compressed_len`].

use crate::coder::{EncodedPlane, EntropyCoder};
use crate::container::{self, ParsedContainer, PlaneEncoding, PlaneRecord, MAX_META_LEN};
use crate::error::{FormatError, InvalidInputError, TensorResult};
use crate::estimate::estimated_bits_per_byte;
use crate::plane_set::PlaneSet;
use alloc::vec::Vec;
use core::slice;
use log::{debug, trace, warn};
use tensor_lossless_transform_common::ElementWidth;

/// Planes estimated at or above this many bits per byte are stored without invoking the coder.
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 7.95;

/// Knobs shared by compression and decompression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodingSettings {
    /// Code planes on the rayon thread pool. Ignored without the `multithreaded` feature.
    pub multithreaded: bool,
    /// Skip the coder for planes whose estimated bits per byte reach this value.
    /// `None` always invokes the coder.
    pub entropy_threshold: Option<f64>,
}

impl Default for CodingSettings {
    fn default() -> Self {
        Self {
            multithreaded: cfg!(feature = "multithreaded"),
            entropy_threshold: Some(DEFAULT_ENTROPY_THRESHOLD),
        }
    }
}

/// Converts a bit width into an [`ElementWidth`].
///
/// # Errors
///
/// [`InvalidInputError::UnsupportedElementWidth`] for anything but 16 or 32.
pub fn width_from_bits(bits: u32) -> Result<ElementWidth, InvalidInputError> {
    ElementWidth::from_bits(bits).ok_or(InvalidInputError::UnsupportedElementWidth(bits))
}

/// Largest container [`compress`] can produce for `element_count` elements of `element_width`.
///
/// Returns [`None`] if the bound does not fit in a `usize`, which only happens on targets
/// narrower than 64 bits.
pub fn max_compressed_len(element_width: ElementWidth, element_count: usize) -> Option<usize> {
    container::PLANE_DESCRIPTOR_SIZE
        .checked_add(element_count)?
        .checked_mul(element_width.plane_count())?
        .checked_add(container::HEADER_SIZE)
}

/// Compresses `input`, a buffer of little-endian elements of `element_width`, with default settings.
///
/// # Errors
///
/// [`InvalidInputError::LengthNotMultipleOfWidth`] if `input` ends mid element.
/// Coder failures are not errors; see the module docs.
pub fn compress<C: EntropyCoder>(
    coder: &C,
    input: &[u8],
    element_width: ElementWidth,
) -> TensorResult<Vec<u8>> {
    compress_with_settings(coder, input, element_width, &CodingSettings::default())
}

/// Same as [`compress`], with explicit [`CodingSettings`].
pub fn compress_with_settings<C: EntropyCoder>(
    coder: &C,
    input: &[u8],
    element_width: ElementWidth,
    settings: &CodingSettings,
) -> TensorResult<Vec<u8>> {
    let planes = PlaneSet::forward(input, element_width)?;
    trace!(
        "Split {} elements of {} bits into {} planes",
        planes.element_count(),
        element_width.bits(),
        planes.plane_count()
    );

    let stored = encode_planes(coder, &planes, settings);
    let records: Vec<PlaneRecord<'_>> = stored
        .iter()
        .zip(planes.planes())
        .map(|(stored, plane)| stored.record(plane))
        .collect();

    let output = container::assemble(element_width, planes.element_count(), &records)?;
    debug!(
        "Compressed {} bytes into {} byte container",
        input.len(),
        output.len()
    );
    Ok(output)
}

/// Compresses `input` after checking it holds exactly `element_count` elements of
/// `element_bits` bits.
///
/// # Errors
///
/// - [`InvalidInputError::UnsupportedElementWidth`] unless `element_bits` is 16 or 32
/// - [`InvalidInputError::LengthMismatch`] if the length disagrees with the element count
pub fn compress_elements<C: EntropyCoder>(
    coder: &C,
    input: &[u8],
    element_bits: u32,
    element_count: usize,
    settings: &CodingSettings,
) -> TensorResult<Vec<u8>> {
    let element_width = width_from_bits(element_bits)?;
    if element_count.checked_mul(element_width.bytes()) != Some(input.len()) {
        return Err(InvalidInputError::LengthMismatch {
            length: input.len(),
            element_count,
            element_bytes: element_width.bytes(),
        }
        .into());
    }

    compress_with_settings(coder, input, element_width, settings)
}

/// Restores the buffer a container was compressed from, with default settings.
///
/// Nothing is returned unless every plane decodes; a failure leaves no partial output behind.
///
/// # Errors
///
/// A [`FormatError`] if the container is malformed or the coder cannot decode a plane.
pub fn decompress<C: EntropyCoder>(coder: &C, container: &[u8]) -> TensorResult<Vec<u8>> {
    decompress_with_settings(coder, container, &CodingSettings::default())
}

/// Same as [`decompress`], with explicit [`CodingSettings`]. Only
/// [`CodingSettings::multithreaded`] is used.
pub fn decompress_with_settings<C: EntropyCoder>(
    coder: &C,
    container: &[u8],
    settings: &CodingSettings,
) -> TensorResult<Vec<u8>> {
    let parsed = container::parse(container)?;
    let element_count = parsed.element_count;
    if element_count == 0 {
        return Ok(Vec::new());
    }

    // The element count comes from untrusted input; a buffer that cannot be allocated is an error.
    let mut data = try_alloc_zeroed(parsed.decompressed_len())?;
    decode_planes(coder, &parsed, &mut data, settings)?;

    let planes = PlaneSet::from_planes(parsed.element_width, element_count, data)?;
    let mut output = try_alloc_zeroed(planes.as_bytes().len())?;
    planes.inverse_into(&mut output)?;
    debug!(
        "Decompressed {} byte container into {} bytes",
        container.len(),
        output.len()
    );
    Ok(output)
}

/// Allocates `len` zeroed bytes, reporting failure instead of aborting.
fn try_alloc_zeroed(len: usize) -> Result<Vec<u8>, FormatError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| FormatError::AllocationFailed { bytes: len })?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Parses `container` without decoding any plane.
///
/// # Errors
///
/// A [`FormatError`] if the container is malformed.
pub fn inspect(container: &[u8]) -> Result<ParsedContainer<'_>, FormatError> {
    let parsed = container::parse(container)?;
    trace!(
        "Container holds {} elements of {} bits",
        parsed.element_count,
        parsed.element_width.bits()
    );
    Ok(parsed)
}

/// How one plane ends up in the container.
enum StoredPlane {
    Raw,
    Constant(u8),
    Entropy(EncodedPlane),
}

impl StoredPlane {
    fn record<'a>(&'a self, plane: &'a [u8]) -> PlaneRecord<'a> {
        match self {
            StoredPlane::Raw => PlaneRecord::raw(plane),
            StoredPlane::Constant(byte) => PlaneRecord {
                encoding: PlaneEncoding::Constant,
                meta: slice::from_ref(byte),
                payload: &[],
            },
            StoredPlane::Entropy(encoded) => PlaneRecord {
                encoding: PlaneEncoding::Entropy,
                meta: &encoded.meta,
                payload: &encoded.compressed,
            },
        }
    }
}

#[cfg(feature = "multithreaded")]
fn encode_planes<C: EntropyCoder>(
    coder: &C,
    planes: &PlaneSet,
    settings: &CodingSettings,
) -> Vec<StoredPlane> {
    use rayon::prelude::*;

    if !settings.multithreaded {
        return encode_planes_sequential(coder, planes, settings);
    }

    (0..planes.plane_count())
        .into_par_iter()
        .map(|index| encode_plane(coder, index, planes.plane(index), settings))
        .collect()
}

#[cfg(not(feature = "multithreaded"))]
fn encode_planes<C: EntropyCoder>(
    coder: &C,
    planes: &PlaneSet,
    settings: &CodingSettings,
) -> Vec<StoredPlane> {
    encode_planes_sequential(coder, planes, settings)
}

fn encode_planes_sequential<C: EntropyCoder>(
    coder: &C,
    planes: &PlaneSet,
    settings: &CodingSettings,
) -> Vec<StoredPlane> {
    planes
        .planes()
        .enumerate()
        .map(|(index, plane)| encode_plane(coder, index, plane, settings))
        .collect()
}

fn encode_plane<C: EntropyCoder>(
    coder: &C,
    index: usize,
    plane: &[u8],
    settings: &CodingSettings,
) -> StoredPlane {
    let Some(&first) = plane.first() else {
        return StoredPlane::Raw;
    };

    if plane.iter().all(|&byte| byte == first) {
        debug!("Plane {index}: constant 0x{first:02X}");
        return StoredPlane::Constant(first);
    }

    if let Some(threshold) = settings.entropy_threshold {
        let bits = estimated_bits_per_byte(plane);
        if bits >= threshold {
            debug!("Plane {index}: estimated {bits:.3} bits/byte, storing raw");
            return StoredPlane::Raw;
        }
    }

    match coder.encode(plane) {
        Err(error) => {
            warn!("Plane {index}: entropy coder failed ({error:?}), storing raw");
            StoredPlane::Raw
        }
        Ok(encoded) if encoded.meta.len() > MAX_META_LEN => {
            warn!(
                "Plane {index}: coder metadata of {} bytes does not fit, storing raw",
                encoded.meta.len()
            );
            StoredPlane::Raw
        }
        Ok(encoded) if encoded.stored_len() >= plane.len() => {
            debug!(
                "Plane {index}: coded to {} of {} bytes, storing raw",
                encoded.stored_len(),
                plane.len()
            );
            StoredPlane::Raw
        }
        Ok(encoded) => {
            debug!(
                "Plane {index}: coded to {} of {} bytes",
                encoded.stored_len(),
                plane.len()
            );
            StoredPlane::Entropy(encoded)
        }
    }
}

/// Decodes every plane of `parsed` into `data`, one `element_count` sized chunk per plane.
#[cfg(feature = "multithreaded")]
fn decode_planes<C: EntropyCoder>(
    coder: &C,
    parsed: &ParsedContainer<'_>,
    data: &mut [u8],
    settings: &CodingSettings,
) -> Result<(), FormatError> {
    use rayon::prelude::*;

    if !settings.multithreaded {
        return decode_planes_sequential(coder, parsed, data);
    }

    data.par_chunks_mut(parsed.element_count)
        .zip(parsed.planes.par_iter())
        .enumerate()
        .try_for_each(|(index, (output, record))| decode_plane(coder, index, record, output))
}

#[cfg(not(feature = "multithreaded"))]
fn decode_planes<C: EntropyCoder>(
    coder: &C,
    parsed: &ParsedContainer<'_>,
    data: &mut [u8],
    _settings: &CodingSettings,
) -> Result<(), FormatError> {
    decode_planes_sequential(coder, parsed, data)
}

fn decode_planes_sequential<C: EntropyCoder>(
    coder: &C,
    parsed: &ParsedContainer<'_>,
    data: &mut [u8],
) -> Result<(), FormatError> {
    data.chunks_mut(parsed.element_count)
        .zip(parsed.planes.iter())
        .enumerate()
        .try_for_each(|(index, (output, record))| decode_plane(coder, index, record, output))
}

/// Decodes one plane into `output`, which is exactly one plane long.
fn decode_plane<C: EntropyCoder>(
    coder: &C,
    index: usize,
    record: &PlaneRecord<'_>,
    output: &mut [u8],
) -> Result<(), FormatError> {
    match record.encoding {
        // Lengths validated by the parser.
        PlaneEncoding::Raw => output.copy_from_slice(record.payload),
        PlaneEncoding::Constant => output.fill(record.meta[0]),
        PlaneEncoding::Entropy => {
            let decoded = coder
                .decode(record.payload, record.meta, output.len())
                .map_err(|error| {
                    warn!("Plane {index}: entropy coder failed to decode ({error:?})");
                    FormatError::PlaneDecodeFailed { plane: index }
                })?;

            if decoded.len() != output.len() {
                return Err(FormatError::DecodedLengthMismatch {
                    plane: index,
                    expected: output.len(),
                    actual: decoded.len(),
                });
            }
            output.copy_from_slice(&decoded);
        }
    }
    Ok(())
}
