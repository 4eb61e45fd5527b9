//! Error types for file I/O operations.

use crate::error::TensorError;
use lightweight_mmap::handles::HandleOpenError;
use lightweight_mmap::mmap::MmapError;
use thiserror::Error;

/// Result type for file operations
pub type FileOperationResult<T> = Result<T, FileOperationError>;

/// Errors that can occur during file operations.
#[derive(Debug, Error)]
pub enum FileOperationError {
    /// Input or output file could not be opened, created or sized.
    #[error("Failed to open file handle: {0}")]
    Open(#[from] HandleOpenError),

    /// Input or output file could not be memory mapped.
    #[error("Failed to create memory mapping: {0}")]
    Map(#[from] MmapError),

    /// Compression or decompression failed
    #[error("Tensor operation failed: {0}")]
    Tensor(#[from] TensorError),
}
