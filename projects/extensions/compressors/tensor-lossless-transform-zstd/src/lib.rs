#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::ffi::c_void;
use tensor_lossless_transform_api::{EncodedPlane, EntropyCoder};
use thiserror::Error;
use zstd_sys::ZSTD_cParameter::*;
use zstd_sys::ZSTD_dParameter::*;
use zstd_sys::ZSTD_format_e::*;
use zstd_sys::*;

/// Errors that can occur while coding planes with ZStandard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ZStandardError {
    /// Invalid compression level
    #[error("Invalid compression level: {0}")]
    InvalidLevel(i32),

    /// ZStandard internal error
    #[error("ZStandard internal error: {0:?}")]
    ZStandardInternal(ZSTD_ErrorCode),

    /// A frame decoded to a different length than the container recorded.
    #[error("Decoded {actual} bytes; expected {expected}")]
    SizeMismatch {
        /// Plane length recorded in the container.
        expected: usize,
        /// Bytes produced by the decoder.
        actual: usize,
    },
}

/// ZStandard implementation of [`EntropyCoder`].
///
/// Each plane becomes one magicless frame. The compression level is fixed when the coder is
/// created; decompression works for frames of any level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZStandardCoder {
    compression_level: i32,
}

impl ZStandardCoder {
    /// Creates a new ZStandard coder with the specified compression level.
    ///
    /// # Parameters
    /// * `compression_level` - Compression level (1-22, where 1 is fastest and 22 is best compression)
    pub fn new(compression_level: i32) -> Result<Self, ZStandardError> {
        if !(1..=22).contains(&compression_level) {
            return Err(ZStandardError::InvalidLevel(compression_level));
        }

        Ok(Self { compression_level })
    }

    /// Creates a new ZStandard coder with compression level 1 (fastest).
    pub fn new_fast() -> Self {
        Self {
            compression_level: 1,
        }
    }

    /// Creates a new ZStandard coder with compression level 3 (default).
    pub fn new_default() -> Self {
        Self {
            compression_level: 3,
        }
    }

    /// Creates a new ZStandard coder with compression level 22 (best compression).
    pub fn new_best() -> Self {
        Self {
            compression_level: 22,
        }
    }

    /// The configured compression level.
    pub fn compression_level(&self) -> i32 {
        self.compression_level
    }
}

impl Default for ZStandardCoder {
    fn default() -> Self {
        Self::new_default()
    }
}

impl EntropyCoder for ZStandardCoder {
    type Error = ZStandardError;

    fn encode(&self, plane: &[u8]) -> Result<EncodedPlane, Self::Error> {
        let mut compressed = vec![0u8; max_alloc_for_compress_size(plane.len())];
        let written = compress(self.compression_level, plane, &mut compressed)?;
        compressed.truncate(written);

        Ok(EncodedPlane {
            compressed,
            meta: Vec::new(),
        })
    }

    fn decode(
        &self,
        compressed: &[u8],
        _meta: &[u8],
        expected_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        // `expected_len` comes from the container; refuse it rather than abort when it is huge.
        let mut output = Vec::new();
        output.try_reserve_exact(expected_len).map_err(|_| {
            ZStandardError::ZStandardInternal(ZSTD_ErrorCode::ZSTD_error_memory_allocation)
        })?;
        output.resize(expected_len, 0);
        let written = decompress(compressed, &mut output)?;
        if written != expected_len {
            return Err(ZStandardError::SizeMismatch {
                expected: expected_len,
                actual: written,
            });
        }

        Ok(output)
    }
}

/// Determines maximum output size needed to compress `source_length` bytes.
fn max_alloc_for_compress_size(source_length: usize) -> usize {
    unsafe { ZSTD_compressBound(source_length) }
}

/// Compresses data with ZStandard into a magicless frame.
/// Does not use fallback to 'copy' if compression is ineffective.
///
/// # Parameters
///
/// * `level`: Level at which we are compressing.
/// * `source`: Source data to compress.
/// * `destination`: Destination buffer.
fn compress(level: i32, source: &[u8], destination: &mut [u8]) -> Result<usize, ZStandardError> {
    // Create a compression context
    let cctx = unsafe { ZSTD_createCCtx() };
    if cctx.is_null() {
        return Err(ZStandardError::ZStandardInternal(
            ZSTD_ErrorCode::ZSTD_error_memory_allocation,
        ));
    }

    // Set compression parameters (magicless format, no extra headers)
    zstd_setcommoncompressparams(cctx, level);

    // Perform compression
    let result = unsafe {
        ZSTD_compress2(
            cctx,
            destination.as_mut_ptr() as *mut c_void,
            destination.len(),
            source.as_ptr() as *const c_void,
            source.len(),
        )
    };

    // Free the context
    unsafe {
        ZSTD_freeCCtx(cctx);
    }

    check_result(result)
}

/// Decompresses a magicless frame produced by [`compress`].
///
/// # Parameters
///
/// * `source`: Source data to decompress.
/// * `destination`: Destination buffer for decompressed data.
fn decompress(source: &[u8], destination: &mut [u8]) -> Result<usize, ZStandardError> {
    // Create decompression context
    let dctx = unsafe { ZSTD_createDCtx() };
    if dctx.is_null() {
        return Err(ZStandardError::ZStandardInternal(
            ZSTD_ErrorCode::ZSTD_error_memory_allocation,
        ));
    }

    // Set decompression parameters to match compression
    zstd_setcommondecompressionparams(dctx);

    // Perform decompression
    let result = unsafe {
        ZSTD_decompressDCtx(
            dctx,
            destination.as_mut_ptr() as *mut c_void,
            destination.len(),
            source.as_ptr() as *const c_void,
            source.len(),
        )
    };

    // Free the context
    unsafe {
        ZSTD_freeDCtx(dctx);
    }

    check_result(result)
}

#[inline(always)]
fn check_result(result: usize) -> Result<usize, ZStandardError> {
    if unsafe { ZSTD_isError(result) } == 0 {
        return Ok(result);
    }

    Err(ZStandardError::ZStandardInternal(unsafe {
        ZSTD_getErrorCode(result)
    }))
}

/// Magicless frames; content size, checksum and dictionary ID are left out.
#[inline(always)]
fn zstd_setcommoncompressparams(cctx: *mut ZSTD_CCtx_s, level: i32) {
    unsafe {
        ZSTD_CCtx_setParameter(cctx, ZSTD_c_compressionLevel, level);
        ZSTD_CCtx_setParameter(
            cctx,
            ZSTD_c_experimentalParam2, // zstd_c_format
            ZSTD_f_zstd1_magicless as i32,
        );
        ZSTD_CCtx_setParameter(cctx, ZSTD_c_contentSizeFlag, 0);
        ZSTD_CCtx_setParameter(cctx, ZSTD_c_checksumFlag, 0);
        ZSTD_CCtx_setParameter(cctx, ZSTD_c_dictIDFlag, 0);
    }
}

#[inline(always)]
fn zstd_setcommondecompressionparams(dctx: *mut ZSTD_DCtx_s) {
    unsafe {
        ZSTD_DCtx_setParameter(
            dctx,
            ZSTD_d_experimentalParam1, // zstd_d_format
            ZSTD_f_zstd1_magicless as i32,
        );
    }
}
