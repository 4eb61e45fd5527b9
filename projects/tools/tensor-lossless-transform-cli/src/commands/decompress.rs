use crate::error::CliError;
use crate::util::Throughput;
use argh::FromArgs;
use bytesize::ByteSize;
use std::{path::PathBuf, time::Instant};
use tensor_lossless_transform_api::TensorCompressBuilder;
use tensor_lossless_transform_zstd::ZStandardCoder;

#[derive(FromArgs, Debug)]
/// Restore a raw tensor file from a container
#[argh(subcommand, name = "decompress")]
pub struct DecompressCmd {
    /// container file
    #[argh(option)]
    pub input: PathBuf,

    /// raw tensor file to create
    #[argh(option)]
    pub output: PathBuf,

    /// decode planes on the current thread only
    #[argh(switch)]
    pub single_threaded: bool,
}

pub fn handle_decompress_command(cmd: DecompressCmd) -> Result<(), CliError> {
    // Frames decode the same at any level.
    let builder =
        TensorCompressBuilder::new(ZStandardCoder::new_default()).multithreaded(!cmd.single_threaded);

    let start = Instant::now();
    let restored = builder.decompress_file(&cmd.input, &cmd.output)?;
    let elapsed = start.elapsed();

    println!(
        "Restored {} in {elapsed:.2?}, {}",
        ByteSize(restored as u64),
        Throughput::from_elapsed(restored, elapsed)
    );
    Ok(())
}
