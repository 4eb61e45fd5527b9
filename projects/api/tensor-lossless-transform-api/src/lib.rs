#![doc = include_str!("../README.MD")]
#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(test)]
pub(crate) mod test_prelude;

pub mod api;
pub mod builder;
pub mod coder;
pub mod container;
pub mod error;
pub mod estimate;
pub mod plane_set;

#[cfg(feature = "file-io")]
pub mod file_io;

// Re-export key types
pub use api::{
    compress, compress_elements, decompress, inspect, max_compressed_len, CodingSettings,
    DEFAULT_ENTROPY_THRESHOLD,
};
pub use builder::TensorCompressBuilder;
pub use coder::{EncodedPlane, EntropyCoder};
pub use container::{ParsedContainer, PlaneEncoding};
pub use error::{FormatError, InvalidInputError, TensorError, TensorResult};
pub use plane_set::PlaneSet;
pub use tensor_lossless_transform_common::ElementWidth;

#[cfg(feature = "file-io")]
pub use file_io::{FileOperationError, FileOperationResult};
