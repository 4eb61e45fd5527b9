//! The transform engine: element buffers to byte planes and back.

use crate::error::InvalidInputError;
use alloc::vec;
use alloc::vec::Vec;
use tensor_lossless_transform_common::{ElementWidth, PlaneValidationError};

/// All byte planes of one buffer, stored back to back.
///
/// Plane `i` occupies `[i * element_count, (i + 1) * element_count)` of the backing storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneSet {
    element_width: ElementWidth,
    element_count: usize,
    data: Vec<u8>,
}

impl PlaneSet {
    /// Splits `input` (little-endian elements of `element_width`) into planes.
    ///
    /// Uses the widest vectorized kernel the CPU supports; the result does not depend on which.
    ///
    /// # Errors
    ///
    /// [`InvalidInputError::LengthNotMultipleOfWidth`] if `input` ends mid element.
    pub fn forward(input: &[u8], element_width: ElementWidth) -> Result<Self, InvalidInputError> {
        let mut data = vec![0u8; input.len()];
        match element_width {
            ElementWidth::Bits16 => tensor_lossless_transform_dtype16::split_planes_slice(input, &mut data),
            ElementWidth::Bits32 => tensor_lossless_transform_dtype32::split_planes_slice(input, &mut data),
        }
        .map_err(|e| map_validation_error(e, element_width))?;

        Ok(Self {
            element_width,
            element_count: input.len() / element_width.bytes(),
            data,
        })
    }

    /// Wraps already separated planes, e.g. ones decoded from a container.
    ///
    /// # Errors
    ///
    /// [`InvalidInputError::LengthMismatch`] unless `data` holds exactly
    /// `element_count * element_width.bytes()` bytes.
    pub fn from_planes(
        element_width: ElementWidth,
        element_count: usize,
        data: Vec<u8>,
    ) -> Result<Self, InvalidInputError> {
        let expected = element_count.checked_mul(element_width.bytes());
        if expected != Some(data.len()) {
            return Err(InvalidInputError::LengthMismatch {
                length: data.len(),
                element_count,
                element_bytes: element_width.bytes(),
            });
        }

        Ok(Self {
            element_width,
            element_count,
            data,
        })
    }

    /// Width of the elements these planes were split from.
    #[inline]
    pub fn element_width(&self) -> ElementWidth {
        self.element_width
    }

    /// Number of elements, which is also the length of every plane.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Number of planes; fixed by the element width.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.element_width.plane_count()
    }

    /// Returns plane `index`.
    ///
    /// # Panics
    ///
    /// If `index >= self.plane_count()`.
    #[inline]
    pub fn plane(&self, index: usize) -> &[u8] {
        assert!(index < self.plane_count(), "plane index out of range");
        let start = index * self.element_count;
        &self.data[start..start + self.element_count]
    }

    /// Iterates the planes in order.
    pub fn planes(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        (0..self.plane_count()).map(move |index| self.plane(index))
    }

    /// All planes as one contiguous slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Joins the planes back into interleaved little-endian elements.
    pub fn inverse(&self) -> Vec<u8> {
        let mut output = vec![0u8; self.data.len()];
        self.join_into(&mut output);
        output
    }

    /// Joins the planes into `output`, which must hold at least
    /// `element_count * element_width.bytes()` bytes.
    ///
    /// # Errors
    ///
    /// [`InvalidInputError::OutputBufferTooSmall`] if `output` is too short.
    pub fn inverse_into(&self, output: &mut [u8]) -> Result<(), InvalidInputError> {
        if output.len() < self.data.len() {
            return Err(InvalidInputError::OutputBufferTooSmall {
                needed: self.data.len(),
                actual: output.len(),
            });
        }

        self.join_into(output);
        Ok(())
    }

    fn join_into(&self, output: &mut [u8]) {
        // SAFETY: `data` always holds `element_count * bytes` bytes (checked at construction)
        // and callers guarantee `output` is at least that long.
        unsafe {
            match self.element_width {
                ElementWidth::Bits16 => tensor_lossless_transform_dtype16::join_planes(
                    self.data.as_ptr(),
                    output.as_mut_ptr(),
                    self.element_count,
                ),
                ElementWidth::Bits32 => tensor_lossless_transform_dtype32::join_planes(
                    self.data.as_ptr(),
                    output.as_mut_ptr(),
                    self.element_count,
                ),
            }
        }
    }
}

fn map_validation_error(error: PlaneValidationError, width: ElementWidth) -> InvalidInputError {
    match error {
        PlaneValidationError::InvalidLength { length, .. } => {
            InvalidInputError::LengthNotMultipleOfWidth {
                length,
                element_bytes: width.bytes(),
            }
        }
        PlaneValidationError::OutputBufferTooSmall { needed, actual } => {
            InvalidInputError::OutputBufferTooSmall { needed, actual }
        }
    }
}
