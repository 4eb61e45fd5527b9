use std::io;
use tensor_lossless_transform_api::file_io::FileOperationError;
use tensor_lossless_transform_api::{FormatError, TensorError};
use tensor_lossless_transform_zstd::ZStandardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    FileOperation(#[from] FileOperationError),
    #[error(transparent)]
    Tensor(#[from] TensorError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    ZStandard(#[from] ZStandardError),
}
