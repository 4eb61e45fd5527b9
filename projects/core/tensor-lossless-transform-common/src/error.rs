//! Errors returned by the safe slice wrappers of the dtype crates.

use thiserror::Error;

/// Validation errors for the safe byte plane transform wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaneValidationError {
    /// Input length is not a multiple of the element width.
    #[error("Invalid input length: {length} (must be divisible by {element_bytes})")]
    InvalidLength {
        /// Length of the input in bytes.
        length: usize,
        /// Width of one element in bytes.
        element_bytes: usize,
    },

    /// Output buffer is too small to hold the result.
    #[error("Output buffer too small: needed {needed}, got {actual}")]
    OutputBufferTooSmall {
        /// The required buffer size.
        needed: usize,
        /// The actual buffer size provided.
        actual: usize,
    },
}

/// Checks that `input_len` is a whole number of `element_bytes` elements and that
/// `output_len` can hold the same number of bytes.
///
/// Returns the element count on success.
#[inline]
pub fn validate_plane_buffers(
    input_len: usize,
    output_len: usize,
    element_bytes: usize,
) -> Result<usize, PlaneValidationError> {
    if input_len % element_bytes != 0 {
        return Err(PlaneValidationError::InvalidLength {
            length: input_len,
            element_bytes,
        });
    }

    if output_len < input_len {
        return Err(PlaneValidationError::OutputBufferTooSmall {
            needed: input_len,
            actual: output_len,
        });
    }

    Ok(input_len / element_bytes)
}
