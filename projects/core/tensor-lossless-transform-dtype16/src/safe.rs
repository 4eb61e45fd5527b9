//! Safe slice wrappers around the pointer based transforms.

use tensor_lossless_transform_common::error::{validate_plane_buffers, PlaneValidationError};

/// Splits `input` (little-endian 16-bit elements) into 2 back to back byte planes in `output`.
///
/// # Errors
///
/// - [`PlaneValidationError::InvalidLength`] if `input.len()` is odd
/// - [`PlaneValidationError::OutputBufferTooSmall`] if `output` is shorter than `input`
pub fn split_planes_slice(input: &[u8], output: &mut [u8]) -> Result<(), PlaneValidationError> {
    let element_count = validate_plane_buffers(input.len(), output.len(), crate::ELEMENT_BYTES)?;

    // SAFETY: lengths validated above; a shared and an exclusive borrow cannot overlap.
    unsafe { crate::split_planes(input.as_ptr(), output.as_mut_ptr(), element_count) };
    Ok(())
}

/// Joins 2 back to back byte planes in `input` into little-endian 16-bit elements in `output`.
///
/// # Errors
///
/// - [`PlaneValidationError::InvalidLength`] if `input.len()` is odd
/// - [`PlaneValidationError::OutputBufferTooSmall`] if `output` is shorter than `input`
pub fn join_planes_slice(input: &[u8], output: &mut [u8]) -> Result<(), PlaneValidationError> {
    let element_count = validate_plane_buffers(input.len(), output.len(), crate::ELEMENT_BYTES)?;

    // SAFETY: lengths validated above; a shared and an exclusive borrow cannot overlap.
    unsafe { crate::join_planes(input.as_ptr(), output.as_mut_ptr(), element_count) };
    Ok(())
}
