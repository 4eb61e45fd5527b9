//! Builder for compressing and decompressing with a fixed coder and settings.

use crate::api::{self, CodingSettings};
use crate::coder::EntropyCoder;
use crate::error::TensorResult;
use alloc::vec::Vec;
use tensor_lossless_transform_common::ElementWidth;

/// Compresses and decompresses tensor buffers with one [`EntropyCoder`].
///
/// The same builder (or one with the same coder) must be used to decompress what it compressed.
/// Settings only affect speed and ratio, never the ability to decompress.
///
/// # Examples
///
/// ```
/// use tensor_lossless_transform_api::coder::StoreCoder;
/// use tensor_lossless_transform_api::{ElementWidth, TensorCompressBuilder};
///
/// let input: Vec<u8> = [1.5f32, -2.0, 0.25].iter().flat_map(|x| x.to_le_bytes()).collect();
///
/// let builder = TensorCompressBuilder::new(StoreCoder)
///     .multithreaded(false)
///     .entropy_threshold(None);
/// let container = builder.compress(&input, ElementWidth::Bits32)?;
/// assert_eq!(builder.decompress(&container)?, input);
/// # Ok::<(), tensor_lossless_transform_api::TensorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TensorCompressBuilder<C: EntropyCoder> {
    coder: C,
    settings: CodingSettings,
}

impl<C: EntropyCoder> TensorCompressBuilder<C> {
    /// Create a builder with default settings.
    pub fn new(coder: C) -> Self {
        Self {
            coder,
            settings: CodingSettings::default(),
        }
    }

    /// Set whether planes are coded on the rayon thread pool.
    ///
    /// Defaults to `true` when the `multithreaded` feature is enabled; has no effect otherwise.
    pub fn multithreaded(mut self, multithreaded: bool) -> Self {
        self.settings.multithreaded = multithreaded;
        self
    }

    /// Set the estimated bits per byte at or above which a plane is stored without coding.
    ///
    /// `None` always runs the coder. Defaults to [`api::DEFAULT_ENTROPY_THRESHOLD`].
    pub fn entropy_threshold(mut self, threshold: Option<f64>) -> Self {
        self.settings.entropy_threshold = threshold;
        self
    }

    /// The coder this builder was created with.
    pub fn coder(&self) -> &C {
        &self.coder
    }

    /// Current settings.
    pub fn settings(&self) -> &CodingSettings {
        &self.settings
    }

    /// Compress `input`. See [`api::compress`].
    pub fn compress(&self, input: &[u8], element_width: ElementWidth) -> TensorResult<Vec<u8>> {
        api::compress_with_settings(&self.coder, input, element_width, &self.settings)
    }

    /// Compress `input`, checking it against an element width in bits and an element count.
    /// See [`api::compress_elements`].
    pub fn compress_elements(
        &self,
        input: &[u8],
        element_bits: u32,
        element_count: usize,
    ) -> TensorResult<Vec<u8>> {
        api::compress_elements(
            &self.coder,
            input,
            element_bits,
            element_count,
            &self.settings,
        )
    }

    /// Restore the buffer `container` was compressed from. See [`api::decompress`].
    pub fn decompress(&self, container: &[u8]) -> TensorResult<Vec<u8>> {
        api::decompress_with_settings(&self.coder, container, &self.settings)
    }

    /// Compress the file at `input_path` into a container at `output_path`.
    /// Returns the container size. See [`crate::file_io::compress_file`].
    #[cfg(feature = "file-io")]
    pub fn compress_file(
        &self,
        input_path: &std::path::Path,
        output_path: &std::path::Path,
        element_width: ElementWidth,
    ) -> crate::file_io::FileOperationResult<usize> {
        crate::file_io::compress_file(
            &self.coder,
            input_path,
            output_path,
            element_width,
            &self.settings,
        )
    }

    /// Restore the container at `input_path` into `output_path`.
    /// Returns the restored size. See [`crate::file_io::decompress_file`].
    #[cfg(feature = "file-io")]
    pub fn decompress_file(
        &self,
        input_path: &std::path::Path,
        output_path: &std::path::Path,
    ) -> crate::file_io::FileOperationResult<usize> {
        crate::file_io::decompress_file(&self.coder, input_path, output_path, &self.settings)
    }
}

impl<C: EntropyCoder + Default> Default for TensorCompressBuilder<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}
