#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
pub(crate) mod test_prelude;

pub mod element;
pub mod safe;
pub(crate) mod transform;
pub(crate) mod untransform;

#[cfg(feature = "bench")]
pub mod bench;

pub use element::{join_element, split_element};
pub use safe::{join_planes_slice, split_planes_slice};
pub use tensor_lossless_transform_common::PlaneValidationError;

/// Number of bytes in one element.
pub const ELEMENT_BYTES: usize = 2;

/// Number of byte planes a buffer is split into.
pub const PLANE_COUNT: usize = 2;

/// Splits a buffer of 16-bit elements into 2 byte planes stored back to back.
///
/// # Arguments
///
/// * `input_ptr` - Pointer to the interleaved little-endian elements
/// * `output_ptr` - Pointer to the output buffer; plane 0 is written to `[0, element_count)`,
///   plane 1 to `[element_count, element_count * 2)`
/// * `element_count` - Number of elements in the input
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 2` bytes
/// - `output_ptr` must be valid for writes of `element_count * 2` bytes
/// - The buffers must not overlap
///
/// Pointers need not be aligned.
#[inline]
pub unsafe fn split_planes(input_ptr: *const u8, output_ptr: *mut u8, element_count: usize) {
    transform::split_planes_with_separate_pointers(
        input_ptr,
        output_ptr,
        output_ptr.add(element_count),
        element_count,
    )
}

/// Splits a buffer of 16-bit elements into 2 byte planes at independent locations.
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 2` bytes
/// - `plane0_ptr` and `plane1_ptr` must each be valid for writes of `element_count` bytes
/// - No buffers may overlap
#[inline]
pub unsafe fn split_planes_with_separate_pointers(
    input_ptr: *const u8,
    plane0_ptr: *mut u8,
    plane1_ptr: *mut u8,
    element_count: usize,
) {
    transform::split_planes_with_separate_pointers(input_ptr, plane0_ptr, plane1_ptr, element_count)
}

/// Reverses [`split_planes`], interleaving 2 back to back byte planes into 16-bit elements.
///
/// # Safety
///
/// - `input_ptr` must be valid for reads of `element_count * 2` bytes
/// - `output_ptr` must be valid for writes of `element_count * 2` bytes
/// - The buffers must not overlap
#[inline]
pub unsafe fn join_planes(input_ptr: *const u8, output_ptr: *mut u8, element_count: usize) {
    untransform::join_planes_with_separate_pointers(
        input_ptr,
        input_ptr.add(element_count),
        output_ptr,
        element_count,
    )
}

/// Reverses [`split_planes_with_separate_pointers`].
///
/// # Safety
///
/// - `plane0_ptr` and `plane1_ptr` must each be valid for reads of `element_count` bytes
/// - `output_ptr` must be valid for writes of `element_count * 2` bytes
/// - No buffers may overlap
#[inline]
pub unsafe fn join_planes_with_separate_pointers(
    plane0_ptr: *const u8,
    plane1_ptr: *const u8,
    output_ptr: *mut u8,
    element_count: usize,
) {
    untransform::join_planes_with_separate_pointers(plane0_ptr, plane1_ptr, output_ptr, element_count)
}
