//! The entropy coder seam.
//!
//! Compression and decompression are generic over [`EntropyCoder`], so any lossless byte coder
//! can be plugged in. See `tensor-lossless-transform-zstd` for a ZStandard backed coder.

use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt::Debug;

/// Output of [`EntropyCoder::encode`] for one plane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedPlane {
    /// Coded bytes.
    pub compressed: Vec<u8>,
    /// Opaque data the coder needs to decode `compressed`. Stored verbatim in the container;
    /// at most 16 MiB - 1 bytes.
    pub meta: Vec<u8>,
}

impl EncodedPlane {
    /// Bytes this plane occupies in the container, excluding the descriptor.
    #[inline]
    pub fn stored_len(&self) -> usize {
        self.compressed.len() + self.meta.len()
    }
}

/// A lossless, deterministic byte stream coder.
///
/// Planes are coded independently and possibly from several threads at once.
pub trait EntropyCoder: Send + Sync {
    /// Coder specific failure. Logged, never interpreted.
    type Error: Debug;

    /// Codes one plane.
    ///
    /// Returning an error is not fatal: the plane is stored uncompressed instead.
    fn encode(&self, plane: &[u8]) -> Result<EncodedPlane, Self::Error>;

    /// Reverses [`EntropyCoder::encode`].
    ///
    /// `expected_len` is the plane length recorded by the container; implementations may use it
    /// to size their output.
    fn decode(
        &self,
        compressed: &[u8],
        meta: &[u8],
        expected_len: usize,
    ) -> Result<Vec<u8>, Self::Error>;
}

/// Coder which stores planes as they are.
///
/// Since its output is never smaller than the input, every non-constant plane ends up raw.
/// Useful when only the constant plane detection is wanted, and as a baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreCoder;

impl EntropyCoder for StoreCoder {
    type Error = Infallible;

    fn encode(&self, plane: &[u8]) -> Result<EncodedPlane, Self::Error> {
        Ok(EncodedPlane {
            compressed: plane.to_vec(),
            meta: Vec::new(),
        })
    }

    fn decode(
        &self,
        compressed: &[u8],
        _meta: &[u8],
        _expected_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        Ok(compressed.to_vec())
    }
}

impl<T: EntropyCoder + ?Sized> EntropyCoder for &T {
    type Error = T::Error;

    #[inline]
    fn encode(&self, plane: &[u8]) -> Result<EncodedPlane, Self::Error> {
        (**self).encode(plane)
    }

    #[inline]
    fn decode(
        &self,
        compressed: &[u8],
        meta: &[u8],
        expected_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        (**self).decode(compressed, meta, expected_len)
    }
}
