//! Error types for compression and decompression.
//!
//! [`InvalidInputError`] means the caller passed something inconsistent; [`FormatError`] means a
//! container could not be read back. Coder failures while compressing never surface: the plane
//! is stored raw instead.

use thiserror::Error;

/// Result type for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;

/// Errors caused by arguments passed to compression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// Input length is not a whole number of elements.
    #[error("Input length {length} is not a multiple of the element size ({element_bytes} bytes)")]
    LengthNotMultipleOfWidth {
        /// Input length in bytes.
        length: usize,
        /// Size of one element in bytes.
        element_bytes: usize,
    },

    /// Declared element count does not describe the input.
    #[error("{element_count} elements of {element_bytes} bytes do not match input length {length}")]
    LengthMismatch {
        /// Input length in bytes.
        length: usize,
        /// Declared number of elements.
        element_count: usize,
        /// Size of one element in bytes.
        element_bytes: usize,
    },

    /// Element width other than 16 or 32 bits.
    #[error("Unsupported element width: {0} bits (expected 16 or 32)")]
    UnsupportedElementWidth(u32),

    /// Number of planes handed to the container does not match the element width.
    #[error("Expected {expected} planes, got {actual}")]
    PlaneCountMismatch {
        /// Planes required by the element width.
        expected: usize,
        /// Planes supplied.
        actual: usize,
    },

    /// Coder metadata does not fit in the 24-bit length field of a plane descriptor.
    #[error("Plane {plane} metadata is {length} bytes; the limit is {max}")]
    MetadataTooLarge {
        /// Index of the offending plane.
        plane: usize,
        /// Metadata length in bytes.
        length: usize,
        /// Largest representable metadata length.
        max: usize,
    },

    /// A plane record's lengths contradict its encoding (a raw plane not `element_count`
    /// bytes long, or a constant plane without exactly one metadata byte).
    #[error("Plane {plane} record is inconsistent with its encoding")]
    InconsistentPlaneRecord {
        /// Index of the offending plane.
        plane: usize,
    },

    /// Output buffer cannot hold the result.
    #[error("Output buffer too small: needed {needed}, got {actual}")]
    OutputBufferTooSmall {
        /// The required buffer size.
        needed: usize,
        /// The actual buffer size provided.
        actual: usize,
    },
}

/// Errors raised while reading a container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Input ends before the fixed size header does.
    #[error("Container header truncated: need {required} bytes, got {actual}")]
    HeaderTooShort {
        /// Header size in bytes.
        required: usize,
        /// Input length in bytes.
        actual: usize,
    },

    /// Header or descriptor has bits set that no version of the format defines.
    #[error("Reserved bits set in container header or plane {plane:?} descriptor")]
    ReservedBitsSet {
        /// `None` for the container header, otherwise the plane index.
        plane: Option<usize>,
    },

    /// Element width tag not recognized.
    #[error("Unknown element width tag: {0}")]
    UnknownElementWidth(u8),

    /// Header plane count does not match the element width.
    #[error("Plane count mismatch: element width requires {expected}, header declares {actual}")]
    PlaneCountMismatch {
        /// Planes required by the element width.
        expected: usize,
        /// Planes declared in the header.
        actual: usize,
    },

    /// Element count too large to address on this platform.
    #[error("Element count {0} is too large for this platform")]
    ElementCountOverflow(u64),

    /// Input ends inside the plane descriptor table.
    #[error("Plane descriptor table truncated: need {required} bytes, got {actual}")]
    DescriptorTableTruncated {
        /// Bytes needed through the end of the table.
        required: usize,
        /// Input length in bytes.
        actual: usize,
    },

    /// Plane encoding value not recognized.
    #[error("Unknown encoding {encoding} for plane {plane}")]
    UnknownPlaneEncoding {
        /// Index of the offending plane.
        plane: usize,
        /// Raw encoding value.
        encoding: u8,
    },

    /// A raw or constant plane declares lengths inconsistent with its encoding.
    #[error("Plane {plane} declares {actual_payload} payload and {actual_meta} metadata bytes; expected {expected_payload} and {expected_meta}")]
    PlaneLengthMismatch {
        /// Index of the offending plane.
        plane: usize,
        /// Payload length required by the encoding.
        expected_payload: u64,
        /// Payload length declared.
        actual_payload: u64,
        /// Metadata length required by the encoding.
        expected_meta: usize,
        /// Metadata length declared.
        actual_meta: usize,
    },

    /// Declared metadata and payload lengths do not add up to the bytes present.
    #[error("Declared plane data is {declared} bytes but {actual} bytes follow the descriptors")]
    PayloadLengthMismatch {
        /// Sum of declared lengths (saturating).
        declared: u64,
        /// Bytes actually present.
        actual: usize,
    },

    /// The buffer the container restores to could not be allocated.
    #[error("Cannot allocate {bytes} bytes for the decompressed buffer")]
    AllocationFailed {
        /// Requested allocation size.
        bytes: usize,
    },

    /// The entropy coder rejected a plane.
    #[error("Entropy coder failed to decode plane {plane}")]
    PlaneDecodeFailed {
        /// Index of the offending plane.
        plane: usize,
    },

    /// The entropy coder returned the wrong number of bytes for a plane.
    #[error("Plane {plane} decoded to {actual} bytes; expected {expected}")]
    DecodedLengthMismatch {
        /// Index of the offending plane.
        plane: usize,
        /// Element count of the container.
        expected: usize,
        /// Bytes returned by the coder.
        actual: usize,
    },
}

/// Any failure of the public compression API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Caller supplied inconsistent arguments.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Container could not be read.
    #[error("Invalid container: {0}")]
    Format(#[from] FormatError),
}
