//! File operations implemented with lightweight-mmap.

use crate::api::{self, CodingSettings};
use crate::coder::EntropyCoder;
use crate::file_io::FileOperationResult;
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use std::path::Path;
use tensor_lossless_transform_common::ElementWidth;

/// Compress a file of little-endian elements into a container file.
///
/// # Arguments
///
/// * `coder` - The entropy coder to use
/// * `input_path` - Path to the raw tensor file
/// * `output_path` - Path to the output file (will be created). The output directory must exist.
/// * `element_width` - Width of the elements in the input file
/// * `settings` - Coding settings
///
/// # Returns
///
/// Size of the written container in bytes
pub fn compress_file<C: EntropyCoder>(
    coder: &C,
    input_path: &Path,
    output_path: &Path,
    element_width: ElementWidth,
    settings: &CodingSettings,
) -> FileOperationResult<usize> {
    with_mapped_input(input_path, |input| {
        let container = api::compress_with_settings(coder, input, element_width, settings)?;
        write_output(output_path, &container)?;
        Ok(container.len())
    })
}

/// Restore a raw tensor file from a container file.
///
/// # Arguments
///
/// * `coder` - The entropy coder the container was created with
/// * `input_path` - Path to the container file
/// * `output_path` - Path to the output file (will be created). The output directory must exist.
/// * `settings` - Coding settings; only [`CodingSettings::multithreaded`] is used
///
/// # Returns
///
/// Size of the restored file in bytes
pub fn decompress_file<C: EntropyCoder>(
    coder: &C,
    input_path: &Path,
    output_path: &Path,
    settings: &CodingSettings,
) -> FileOperationResult<usize> {
    with_mapped_input(input_path, |input| {
        let restored = api::decompress_with_settings(coder, input, settings)?;
        write_output(output_path, &restored)?;
        Ok(restored.len())
    })
}

/// Memory maps `input_path` and passes its contents to `operation`.
fn with_mapped_input<T>(
    input_path: &Path,
    operation: impl FnOnce(&[u8]) -> FileOperationResult<T>,
) -> FileOperationResult<T> {
    let input_handle = ReadOnlyFileHandle::open(input_path)?;
    let input_size = input_handle.size()? as usize;

    // Zero length mappings are rejected by the OS.
    if input_size == 0 {
        return operation(&[]);
    }

    let input_mapping = ReadOnlyMmap::new(&input_handle, 0, input_size)?;
    operation(input_mapping.as_slice())
}

/// Creates `output_path` with exactly `data.len()` bytes and writes `data` into it.
fn write_output(output_path: &Path, data: &[u8]) -> FileOperationResult<()> {
    let output_handle = ReadWriteFileHandle::create_preallocated(output_path, data.len() as i64)?;
    if data.is_empty() {
        return Ok(());
    }

    let mut output_mapping = ReadWriteMmap::new(&output_handle, 0, data.len())?;
    output_mapping.as_mut_slice().copy_from_slice(data);
    Ok(())
}
